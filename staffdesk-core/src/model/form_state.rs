//! src/model/form_state.rs
//! ============================================================================
//! # FormState: the employee modal as an explicit state machine
//!
//! `Closed` renders nothing and accepts no input. `Open` carries the mode
//! (create or edit) and a private working buffer. The buffer is seeded only by
//! [`FormState::open`]; edits never leave it until the user submits.

use std::fmt;

use crate::model::employee::{Employee, EmployeeId};

/// Input fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Salary,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Salary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Salary => "Salary",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

/// A field that failed its input constraint on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Uncommitted copy of the record being edited. Salary is kept as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormBuffer {
    id: Option<EmployeeId>,
    first_name: String,
    last_name: String,
    email: String,
    salary: String,
}

impl FormBuffer {
    pub fn from_employee(emp: &Employee) -> Self {
        Self {
            id: emp.id,
            first_name: emp.first_name.clone(),
            last_name: emp.last_name.clone(),
            email: emp.email.clone(),
            salary: emp.salary.to_string(),
        }
    }

    #[inline]
    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Salary => &self.salary,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Salary => &mut self.salary,
        }
    }

    /// Appends `ch` to `field`. The salary field only takes numeric input;
    /// rejected characters return `false`.
    pub fn push_char(&mut self, field: FormField, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }

        if field == FormField::Salary {
            // The create template's "0" counts as empty.
            let placeholder = self.salary == "0";
            let current = &self.salary;
            let accepted = ch.is_ascii_digit()
                || (ch == '.' && !current.contains('.'))
                || (ch == '-' && (current.is_empty() || placeholder));
            if !accepted {
                return false;
            }
            if placeholder && ch != '.' {
                self.salary.clear();
            }
        }

        self.value_mut(field).push(ch);
        true
    }

    pub fn pop_char(&mut self, field: FormField) -> bool {
        self.value_mut(field).pop().is_some()
    }

    /// Checks the input constraints in field order and builds the record.
    pub fn to_employee(&self) -> Result<Employee, FieldError> {
        for field in [FormField::FirstName, FormField::LastName, FormField::Email] {
            if self.value(field).trim().is_empty() {
                return Err(FieldError {
                    field,
                    message: "required",
                });
            }
        }

        if !looks_like_email(&self.email) {
            return Err(FieldError {
                field: FormField::Email,
                message: "enter an email address",
            });
        }

        let salary_text = self.salary.trim();
        if salary_text.is_empty() {
            return Err(FieldError {
                field: FormField::Salary,
                message: "required",
            });
        }
        let salary = salary_text
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or(FieldError {
                field: FormField::Salary,
                message: "enter a number",
            })?;

        Ok(Employee {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            salary,
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// An open modal: mode, working buffer and field focus.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub buffer: FormBuffer,
    pub focus: FormField,
    pub invalid: Option<FieldError>,
}

impl OpenForm {
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Employee",
            FormMode::Edit(_) => "Edit Employee",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Save Employee",
            FormMode::Edit(_) => "Update Changes",
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn input(&mut self, ch: char) -> bool {
        let changed = self.buffer.push_char(self.focus, ch);
        if changed && self.invalid.is_some_and(|e| e.field == self.focus) {
            self.invalid = None;
        }
        changed
    }

    pub fn backspace(&mut self) -> bool {
        self.buffer.pop_char(self.focus)
    }

    /// Produces the record to save, or marks and focuses the offending field.
    pub fn submit(&mut self) -> Result<Employee, FieldError> {
        match self.buffer.to_employee() {
            Ok(emp) => {
                self.invalid = None;
                Ok(emp)
            }
            Err(err) => {
                self.focus = err.field;
                self.invalid = Some(err);
                Err(err)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(OpenForm),
}

impl FormState {
    /// (Re)initializes the working buffer from `record`, or from the empty
    /// template when there is none. Whatever was typed before is dropped.
    pub fn open(record: Option<&Employee>) -> Self {
        let (mode, buffer) = match record {
            Some(emp) => {
                let mode = emp.id.map_or(FormMode::Create, FormMode::Edit);
                (mode, FormBuffer::from_employee(emp))
            }
            None => (FormMode::Create, FormBuffer::from_employee(&Employee::empty())),
        };

        Self::Open(OpenForm {
            mode,
            buffer,
            focus: FormField::FirstName,
            invalid: None,
        })
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn as_open(&self) -> Option<&OpenForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut OpenForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }
}
