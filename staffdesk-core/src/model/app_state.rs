//! src/model/app_state.rs
//! Controller-owned application state: the authoritative list and everything
//! the views read from it.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::model::{
    employee::{Employee, EmployeeId},
    form_state::FormState,
    pager::Pager,
    ui_state::{RedrawFlag, UIOverlay, UIState},
};

/// Which surface currently receives key presses, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Notice,
    ConfirmDelete,
    Form,
    Help,
    List,
}

#[derive(Debug)]
pub struct AppState {
    /// Last successfully fetched collection, replaced wholesale.
    pub employees: Vec<Employee>,

    pub pager: Pager,

    /// Row within the current page that edit/delete act on.
    pub row_cursor: usize,

    pub form: FormState,

    /// Record awaiting the user's yes/no before a delete is issued.
    pub pending_delete: Option<Employee>,

    /// Requests spawned but not yet reported back.
    pub in_flight: usize,

    pub last_refreshed: Option<DateTime<Local>>,

    pub ui: UIState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Pager::default())
    }
}

impl AppState {
    pub fn new(pager: Pager) -> Self {
        Self {
            employees: Vec::new(),
            pager,
            row_cursor: 0,
            form: FormState::Closed,
            pending_delete: None,
            in_flight: 0,
            last_refreshed: None,
            ui: UIState::default(),
        }
    }

    pub fn focus(&self) -> Focus {
        if self.ui.blocking_notice().is_some() {
            Focus::Notice
        } else if self.pending_delete.is_some() {
            Focus::ConfirmDelete
        } else if self.form.is_open() {
            Focus::Form
        } else if self.ui.overlay == UIOverlay::Help {
            Focus::Help
        } else {
            Focus::List
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.employees.len()
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.total())
    }

    pub fn page_rows(&self) -> &[Employee] {
        self.pager.page_slice(&self.employees)
    }

    pub fn selected(&self) -> Option<&Employee> {
        self.page_rows().get(self.row_cursor)
    }

    pub fn selected_id(&self) -> Option<EmployeeId> {
        self.selected().and_then(|emp| emp.id)
    }

    /// Swaps in a freshly fetched list. The page cursor is left alone; only
    /// the row cursor is pulled back inside the visible rows.
    pub fn replace_employees(&mut self, employees: Vec<Employee>) {
        debug!(
            previous = self.employees.len(),
            current = employees.len(),
            "Replacing authoritative list"
        );
        self.employees = employees;
        self.last_refreshed = Some(Local::now());
        self.clamp_row_cursor();
        self.ui.request_redraw(RedrawFlag::All);
    }

    fn clamp_row_cursor(&mut self) {
        let rows = self.page_rows().len();
        self.row_cursor = self.row_cursor.min(rows.saturating_sub(1));
    }

    pub fn move_cursor_up(&mut self) -> bool {
        if self.row_cursor == 0 {
            return false;
        }
        self.row_cursor -= 1;
        self.ui.request_redraw(RedrawFlag::Main);
        true
    }

    pub fn move_cursor_down(&mut self) -> bool {
        if self.row_cursor + 1 >= self.page_rows().len() {
            return false;
        }
        self.row_cursor += 1;
        self.ui.request_redraw(RedrawFlag::Main);
        true
    }

    fn page_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.row_cursor = 0;
            self.ui.request_redraw(RedrawFlag::Main);
            self.ui.request_redraw(RedrawFlag::StatusBar);
        }
        changed
    }

    pub fn prev_page(&mut self) -> bool {
        let changed = self.pager.prev();
        self.page_changed(changed)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.total();
        let changed = self.pager.next(total);
        self.page_changed(changed)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.total();
        let changed = self.pager.go_to(page, total);
        self.page_changed(changed)
    }

    pub fn open_form(&mut self, record: Option<&Employee>) {
        self.form = FormState::open(record);
        self.ui.request_redraw(RedrawFlag::All);
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
        self.ui.request_redraw(RedrawFlag::All);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: i64) -> Vec<Employee> {
        (1..=n)
            .map(|i| Employee {
                id: Some(i),
                first_name: format!("First{i}"),
                last_name: format!("Last{i}"),
                email: format!("e{i}@corp.test"),
                salary: 1000.0 * i as f64,
            })
            .collect()
    }

    #[test]
    fn page_three_of_twelve() {
        let mut state = AppState::new(Pager::new(5));
        state.replace_employees(roster(12));

        assert_eq!(state.page_count(), 3);
        assert!(state.go_to_page(3));
        let ids: Vec<_> = state.page_rows().iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[test]
    fn cursor_follows_page_bounds() {
        let mut state = AppState::new(Pager::new(5));
        state.replace_employees(roster(7));

        for _ in 0..10 {
            state.move_cursor_down();
        }
        assert_eq!(state.row_cursor, 4);
        assert_eq!(state.selected_id(), Some(5));

        assert!(state.next_page());
        assert_eq!(state.row_cursor, 0);
        assert_eq!(state.selected_id(), Some(6));
        assert!(state.move_cursor_down());
        assert!(!state.move_cursor_down());
        assert!(state.move_cursor_up());
        assert!(!state.move_cursor_up());
    }

    #[test]
    fn refresh_clamps_row_but_not_page() {
        let mut state = AppState::new(Pager::new(5));
        state.replace_employees(roster(11));
        state.go_to_page(3);
        assert_eq!(state.selected_id(), Some(11));

        state.replace_employees(roster(10));
        assert_eq!(state.pager.current(), 3);
        assert!(state.page_rows().is_empty());
        assert_eq!(state.selected(), None);
        assert!(state.last_refreshed.is_some());
    }

    #[test]
    fn focus_is_topmost_surface() {
        let mut state = AppState::default();
        assert_eq!(state.focus(), Focus::List);

        state.ui.toggle_help();
        assert_eq!(state.focus(), Focus::Help);

        state.open_form(None);
        assert_eq!(state.focus(), Focus::Form);

        state.pending_delete = Some(Employee::empty());
        assert_eq!(state.focus(), Focus::ConfirmDelete);

        state.ui.show_error("nope");
        assert_eq!(state.focus(), Focus::Notice);
    }

    #[test]
    fn form_open_close() {
        let mut state = AppState::default();
        let emp = roster(1).remove(0);

        state.open_form(Some(&emp));
        assert!(state.form.is_open());
        state.close_form();
        assert_eq!(state.form, FormState::Closed);
    }
}
