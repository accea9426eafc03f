//! src/model/employee.rs
//! ============================================================================
//! # Employee: the record exchanged with the backend
//!
//! An employee without an `id` has never been persisted. The backend assigns
//! the id on create, and every later refresh replaces the local copy wholesale.

use serde::{Deserialize, Serialize};

/// Backend-assigned record identifier.
pub type EmployeeId = i64;

/// One employee record, serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Absent for records that exist only in the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub salary: f64,
}

impl Employee {
    /// The all-empty template used to seed the create form.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// `#<id>` for persisted records, a dash otherwise.
    pub fn display_id(&self) -> String {
        match self.id {
            Some(id) => format!("#{id}"),
            None => "—".to_string(),
        }
    }

    pub fn display_salary(&self) -> String {
        format!("₹{}", format_amount(self.salary))
    }
}

/// Formats an amount with thousands separators and at most two decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if value < 0.0 && cents > 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac != 0 {
        let frac_str = format!("{frac:02}");
        grouped.push('.');
        grouped.push_str(frac_str.trim_end_matches('0'));
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: Some(7),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            salary: 75_000.0,
        }
    }

    #[test]
    fn new_record_omits_id_on_the_wire() {
        let mut emp = sample();
        emp.id = None;

        let json = serde_json::to_value(&emp).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["lastName"], "Rao");
        assert_eq!(json["salary"], 75_000.0);
    }

    #[test]
    fn record_missing_a_field_is_rejected() {
        let raw = r#"{"id":1,"lastName":"X","email":"a@b","salary":1}"#;
        let err = serde_json::from_str::<Employee>(raw).unwrap_err();
        assert!(err.to_string().contains("firstName"));
    }

    #[test]
    fn record_without_id_decodes() {
        let raw = r#"{"firstName":"Li","lastName":"Wei","email":"li@x.io","salary":10}"#;
        let emp: Employee = serde_json::from_str(raw).unwrap();
        assert!(emp.is_new());
    }

    #[test]
    fn decodes_backend_payload() {
        let raw = r#"{"id":3,"firstName":"Li","lastName":"Wei","email":"li@x.io","salary":1200.5}"#;
        let emp: Employee = serde_json::from_str(raw).unwrap();

        assert_eq!(emp.id, Some(3));
        assert!(!emp.is_new());
        assert_eq!(emp.first_name, "Li");
        assert_eq!(emp.salary, 1200.5);
    }

    #[test]
    fn null_id_means_new() {
        let raw = r#"{"id":null,"firstName":"A","lastName":"B","email":"a@b.c","salary":0}"#;
        let emp: Employee = serde_json::from_str(raw).unwrap();
        assert!(emp.is_new());
    }

    #[test]
    fn empty_template_is_zeroed() {
        let emp = Employee::empty();
        assert!(emp.is_new());
        assert!(emp.first_name.is_empty());
        assert!(emp.last_name.is_empty());
        assert!(emp.email.is_empty());
        assert_eq!(emp.salary, 0.0);
    }

    #[test]
    fn salary_formatting() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(75_000.0), "75,000");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(1_234.5), "1,234.5");
        assert_eq!(format_amount(10.25), "10.25");
        assert_eq!(format_amount(-4_500.0), "-4,500");
        assert_eq!(sample().display_salary(), "₹75,000");
    }

    #[test]
    fn display_id() {
        assert_eq!(sample().display_id(), "#7");
        assert_eq!(Employee::empty().display_id(), "—");
    }
}
