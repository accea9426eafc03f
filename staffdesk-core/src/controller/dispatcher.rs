//! src/controller/dispatcher.rs
//! Controller: owns the application state and performs every backend call.
//!
//! Views never mutate state and never talk to the backend. They emit
//! [`Action`]s, which the controller applies here. Network work is spawned
//! as background tasks whose [`TaskResult`]s come back through
//! [`Controller::on_task_result`]. Overlapping requests are neither
//! deduplicated nor cancelled; every completion refreshes the list.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::api::client::{ApiError, EmployeeApi};
use crate::controller::actions::Action;
use crate::controller::event_loop::{SaveOp, TaskResult};
use crate::model::{
    app_state::AppState,
    employee::{Employee, EmployeeId},
    ui_state::RedrawFlag,
};
use crate::tasks::api_task::{spawn_delete, spawn_fetch, spawn_save};

pub struct Controller {
    state: AppState,
    api: Arc<dyn EmployeeApi>,
    task_tx: UnboundedSender<TaskResult>,
}

impl Controller {
    pub fn new(
        state: AppState,
        api: Arc<dyn EmployeeApi>,
        task_tx: UnboundedSender<TaskResult>,
    ) -> Self {
        Self {
            state,
            api,
            task_tx,
        }
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Applies one action. Returns `false` when the application should exit.
    pub fn handle(&mut self, action: Action) -> bool {
        debug!("Handling action: {:?}", action);

        match action {
            Action::Quit => return false,

            Action::Refresh => self.fetch_all(),

            Action::OpenCreate => self.open_create(),

            Action::OpenEdit(record) => self.open_edit(&record),

            Action::EditSelected => {
                if let Some(record) = self.state.selected().cloned() {
                    self.open_edit(&record);
                }
            }

            Action::CloseForm => self.close_form(),

            Action::Save(record) => self.save(record),

            Action::SubmitForm => self.submit_form(),

            Action::FormInput(ch) => {
                if let Some(form) = self.state.form.as_open_mut()
                    && form.input(ch)
                {
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
            }

            Action::FormBackspace => {
                if let Some(form) = self.state.form.as_open_mut()
                    && form.backspace()
                {
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
            }

            Action::FormNextField => {
                if let Some(form) = self.state.form.as_open_mut() {
                    form.focus_next();
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
            }

            Action::FormPrevField => {
                if let Some(form) = self.state.form.as_open_mut() {
                    form.focus_prev();
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
            }

            Action::RequestDelete(id) => self.request_delete(id),

            Action::DeleteSelected => {
                if let Some(id) = self.state.selected_id() {
                    self.request_delete(id);
                }
            }

            Action::ConfirmDelete => self.confirm_delete(),

            Action::CancelDelete => self.cancel_delete(),

            Action::PrevPage => {
                self.state.prev_page();
            }

            Action::NextPage => {
                self.state.next_page();
            }

            Action::GoToPage(page) => {
                self.state.go_to_page(page);
            }

            Action::CursorUp => {
                self.state.move_cursor_up();
            }

            Action::CursorDown => {
                self.state.move_cursor_down();
            }

            Action::ToggleHelp => self.state.ui.toggle_help(),

            Action::DismissNotice => {
                self.state.ui.dismiss_notification();
            }

            Action::Resize(_, _) => self.state.ui.request_redraw(RedrawFlag::All),

            Action::Tick => {
                self.state.ui.update_notification();
            }
        }

        true
    }

    /// Reads the full collection. The current list stays until it succeeds.
    pub fn fetch_all(&mut self) {
        self.state.in_flight += 1;
        self.state.ui.request_redraw(RedrawFlag::StatusBar);
        spawn_fetch(self.api.clone(), self.task_tx.clone());
    }

    pub fn open_create(&mut self) {
        info!("Opening form: create");
        self.state.open_form(None);
    }

    pub fn open_edit(&mut self, record: &Employee) {
        info!(id = ?record.id, "Opening form: edit");
        self.state.open_form(Some(record));
    }

    pub fn close_form(&mut self) {
        self.state.close_form();
    }

    /// Update when the record has an id, create otherwise. The form stays
    /// open until the write is confirmed.
    pub fn save(&mut self, record: Employee) {
        info!(id = ?record.id, "Saving employee");
        self.state.in_flight += 1;
        self.state.ui.request_redraw(RedrawFlag::StatusBar);
        spawn_save(self.api.clone(), record, self.task_tx.clone());
    }

    fn submit_form(&mut self) {
        let Some(form) = self.state.form.as_open_mut() else {
            return;
        };

        match form.submit() {
            Ok(record) => self.save(record),
            Err(invalid) => {
                debug!("Form rejected: {}", invalid);
                self.state.ui.request_redraw(RedrawFlag::Overlay);
            }
        }
    }

    /// Stages a delete; nothing is sent until the user confirms.
    pub fn request_delete(&mut self, id: EmployeeId) {
        match self.state.employees.iter().find(|e| e.id == Some(id)) {
            Some(record) => {
                self.state.pending_delete = Some(record.clone());
                self.state.ui.request_redraw(RedrawFlag::Overlay);
            }
            None => warn!(id, "Delete requested for an unknown employee"),
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(record) = self.state.pending_delete.take() else {
            return;
        };
        self.state.ui.request_redraw(RedrawFlag::All);

        if let Some(id) = record.id {
            info!(id, "Deleting employee");
            self.state.in_flight += 1;
            spawn_delete(self.api.clone(), id, self.task_tx.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some(record) = self.state.pending_delete.take() {
            debug!(id = ?record.id, "Delete cancelled");
            self.state.ui.request_redraw(RedrawFlag::All);
        }
    }

    /// Applies a completed background request.
    pub fn on_task_result(&mut self, result: TaskResult) {
        self.state.in_flight = self.state.in_flight.saturating_sub(1);
        self.state.ui.request_redraw(RedrawFlag::StatusBar);

        match result {
            TaskResult::Fetched(refreshed) => self.apply_refresh(refreshed),

            TaskResult::Saved { op, refreshed } => {
                info!(?op, "Employee saved");
                self.apply_refresh(refreshed);
                self.close_form();
                let message = match op {
                    SaveOp::Create => "Employee added",
                    SaveOp::Update(_) => "Employee updated",
                };
                // An earlier failed save's notice stays up until dismissed.
                if !self.state.ui.show_success(message) {
                    debug!(?op, "Save confirmation held back by pending error notice");
                }
            }

            TaskResult::SaveFailed { op, error } => {
                error!(?op, "Error saving employee: {}", error);
                self.state
                    .ui
                    .show_error("Error saving data. Check the log for details.");
            }

            TaskResult::Deleted { id, refreshed } => {
                info!(id, "Employee deleted");
                self.apply_refresh(refreshed);
            }

            TaskResult::DeleteFailed { id, error } => {
                error!(id, "Error deleting employee: {}", error);
            }
        }
    }

    fn apply_refresh(&mut self, refreshed: Result<Vec<Employee>, ApiError>) {
        match refreshed {
            Ok(employees) => self.state.replace_employees(employees),
            Err(e) => error!("Error fetching employees: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockApi};
    use crate::model::{
        app_state::Focus,
        form_state::{FormField, FormMode},
        pager::Pager,
    };
    use tokio::sync::mpsc::{self, UnboundedReceiver};

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

    fn setup(records: Vec<Employee>) -> (Controller, MockApi, UnboundedReceiver<TaskResult>) {
        let api = MockApi::with_records(records);
        let (tx, rx) = mpsc::unbounded_channel();
        let ctrl = Controller::new(AppState::new(Pager::new(5)), Arc::new(api.clone()), tx);
        (ctrl, api, rx)
    }

    /// Feeds completions back until nothing is in flight.
    async fn settle(ctrl: &mut Controller, rx: &mut UnboundedReceiver<TaskResult>) {
        while ctrl.state().in_flight > 0 {
            let result = rx.recv().await.expect("task channel open");
            ctrl.on_task_result(result);
        }
    }

    async fn loaded(n: i64) -> (Controller, MockApi, UnboundedReceiver<TaskResult>) {
        let (mut ctrl, api, mut rx) = setup(roster(n));
        ctrl.handle(Action::Refresh);
        settle(&mut ctrl, &mut rx).await;
        api.backend().calls.clear();
        (ctrl, api, rx)
    }

    fn type_str(ctrl: &mut Controller, s: &str) {
        for ch in s.chars() {
            ctrl.handle(Action::FormInput(ch));
        }
    }

    #[tokio::test]
    async fn refresh_replaces_list() {
        let (ctrl, _api, _rx) = loaded(12).await;
        assert_eq!(ctrl.state().total(), 12);
        assert_eq!(ctrl.state().page_count(), 3);
        assert_eq!(ctrl.state().page_rows().len(), 5);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_stale_list() {
        let (mut ctrl, api, mut rx) = loaded(3).await;
        api.backend().fail_list = true;
        api.backend().records.clear();

        ctrl.handle(Action::Refresh);
        settle(&mut ctrl, &mut rx).await;

        assert_eq!(ctrl.state().total(), 3);
        assert!(ctrl.state().ui.notification.is_none());
    }

    #[tokio::test]
    async fn create_closes_form_and_shows_server_id() {
        let (mut ctrl, api, mut rx) = loaded(2).await;

        ctrl.handle(Action::OpenCreate);
        type_str(&mut ctrl, "Kavya");
        ctrl.handle(Action::FormNextField);
        type_str(&mut ctrl, "Menon");
        ctrl.handle(Action::FormNextField);
        type_str(&mut ctrl, "kavya@corp.test");
        ctrl.handle(Action::FormNextField);
        type_str(&mut ctrl, "61000");
        ctrl.handle(Action::SubmitForm);

        // Submission alone never closes the modal.
        assert!(ctrl.state().form.is_open());
        settle(&mut ctrl, &mut rx).await;

        assert!(!ctrl.state().form.is_open());
        let calls = api.calls();
        assert!(matches!(&calls[0], ApiCall::Create(e) if e.id.is_none()));
        assert_eq!(calls[1], ApiCall::List);

        let created = ctrl
            .state()
            .employees
            .iter()
            .find(|e| e.first_name == "Kavya")
            .expect("new record fetched");
        assert_eq!(created.id, Some(3));
    }

    #[tokio::test]
    async fn edit_issues_update_never_create() {
        let (mut ctrl, api, mut rx) = loaded(7).await;
        ctrl.handle(Action::NextPage);
        ctrl.handle(Action::CursorDown);
        ctrl.handle(Action::EditSelected);

        let form = ctrl.state().form.as_open().unwrap();
        assert_eq!(form.mode, FormMode::Edit(7));
        assert_eq!(form.buffer.to_employee().unwrap(), roster(7)[6]);

        ctrl.handle(Action::FormInput('!'));
        ctrl.handle(Action::SubmitForm);
        settle(&mut ctrl, &mut rx).await;

        let calls = api.calls();
        assert!(matches!(&calls[0], ApiCall::Update(7, e) if e.first_name == "First7!"));
        assert!(!calls.iter().any(|c| matches!(c, ApiCall::Create(_))));
        assert_eq!(calls.last(), Some(&ApiCall::List));
        assert_eq!(ctrl.state().employees[6].first_name, "First7!");
        // Page cursor survives the form round trip.
        assert_eq!(ctrl.state().pager.current(), 2);
    }

    #[tokio::test]
    async fn failed_save_keeps_form_and_input() {
        let (mut ctrl, api, mut rx) = loaded(1).await;
        api.backend().fail_save = true;

        ctrl.handle(Action::OpenCreate);
        type_str(&mut ctrl, "Zed");
        ctrl.handle(Action::FormNextField);
        type_str(&mut ctrl, "Q");
        ctrl.handle(Action::FormNextField);
        type_str(&mut ctrl, "zed@q.io");
        ctrl.handle(Action::SubmitForm);
        settle(&mut ctrl, &mut rx).await;

        let form = ctrl.state().form.as_open().expect("modal stays open");
        assert_eq!(form.buffer.value(FormField::FirstName), "Zed");
        assert_eq!(form.buffer.value(FormField::Email), "zed@q.io");
        assert_eq!(ctrl.state().focus(), Focus::Notice);
        assert_eq!(api.calls().len(), 1, "no refresh after a failed save");

        ctrl.handle(Action::DismissNotice);
        assert_eq!(ctrl.state().focus(), Focus::Form);
    }

    #[tokio::test]
    async fn invalid_form_makes_no_call() {
        let (mut ctrl, api, _rx) = loaded(1).await;
        ctrl.handle(Action::OpenCreate);
        ctrl.handle(Action::SubmitForm);

        assert_eq!(ctrl.state().in_flight, 0);
        assert!(api.calls().is_empty());
        let form = ctrl.state().form.as_open().unwrap();
        assert_eq!(form.invalid.map(|e| e.field), Some(FormField::FirstName));
    }

    #[tokio::test]
    async fn cancel_discards_buffer() {
        let (mut ctrl, _api, _rx) = loaded(1).await;
        ctrl.handle(Action::OpenCreate);
        type_str(&mut ctrl, "scratch");
        ctrl.handle(Action::CloseForm);
        assert!(!ctrl.state().form.is_open());

        ctrl.handle(Action::OpenCreate);
        let form = ctrl.state().form.as_open().unwrap();
        assert_eq!(form.buffer.value(FormField::FirstName), "");
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let (mut ctrl, api, mut rx) = loaded(3).await;

        ctrl.handle(Action::DeleteSelected);
        assert_eq!(ctrl.state().focus(), Focus::ConfirmDelete);
        assert!(api.calls().is_empty());

        ctrl.handle(Action::ConfirmDelete);
        settle(&mut ctrl, &mut rx).await;

        assert_eq!(api.calls(), vec![ApiCall::Delete(1), ApiCall::List]);
        assert_eq!(ctrl.state().total(), 2);
        assert!(ctrl.state().pending_delete.is_none());
    }

    #[tokio::test]
    async fn cancelled_delete_sends_nothing() {
        let (mut ctrl, api, _rx) = loaded(3).await;

        ctrl.handle(Action::RequestDelete(2));
        ctrl.handle(Action::CancelDelete);

        assert!(api.calls().is_empty());
        assert_eq!(ctrl.state().in_flight, 0);
        assert_eq!(ctrl.state().total(), 3);
        assert_eq!(ctrl.state().focus(), Focus::List);
    }

    #[tokio::test]
    async fn failed_delete_is_silent() {
        let (mut ctrl, api, mut rx) = loaded(3).await;
        api.backend().fail_delete = true;

        ctrl.handle(Action::RequestDelete(3));
        ctrl.handle(Action::ConfirmDelete);
        settle(&mut ctrl, &mut rx).await;

        assert!(ctrl.state().ui.notification.is_none());
        assert_eq!(ctrl.state().total(), 3);
        assert_eq!(api.calls(), vec![ApiCall::Delete(3)]);
    }

    #[tokio::test]
    async fn unknown_delete_target_is_ignored() {
        let (mut ctrl, _api, _rx) = loaded(2).await;
        ctrl.handle(Action::RequestDelete(99));
        assert!(ctrl.state().pending_delete.is_none());
    }

    #[tokio::test]
    async fn save_completion_closes_form_even_if_refresh_fails() {
        let (mut ctrl, api, _rx) = loaded(2).await;
        ctrl.handle(Action::OpenEdit(roster(2)[0].clone()));
        api.backend().fail_list = true;

        ctrl.state_mut().in_flight = 1;
        ctrl.on_task_result(TaskResult::Saved {
            op: SaveOp::Update(1),
            refreshed: Err(ApiError::status(503, "down")),
        });

        assert!(!ctrl.state().form.is_open());
        assert_eq!(ctrl.state().total(), 2);
        assert_eq!(ctrl.state().in_flight, 0);
    }

    #[tokio::test]
    async fn overlapping_success_keeps_failed_save_notice() {
        let (mut ctrl, _api, _rx) = loaded(2).await;
        ctrl.handle(Action::OpenEdit(roster(2)[0].clone()));

        ctrl.state_mut().in_flight = 2;
        ctrl.on_task_result(TaskResult::SaveFailed {
            op: SaveOp::Create,
            error: ApiError::status(500, "boom"),
        });
        assert_eq!(ctrl.state().focus(), Focus::Notice);

        ctrl.on_task_result(TaskResult::Saved {
            op: SaveOp::Update(1),
            refreshed: Ok(roster(2)),
        });

        assert_eq!(ctrl.state().focus(), Focus::Notice);
        assert_eq!(
            ctrl.state().ui.blocking_notice().map(|n| n.message.as_str()),
            Some("Error saving data. Check the log for details.")
        );
        assert_eq!(ctrl.state().in_flight, 0);

        ctrl.handle(Action::DismissNotice);
        assert_eq!(ctrl.state().focus(), Focus::List);
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let (mut ctrl, _api, _rx) = setup(Vec::new());
        assert!(ctrl.handle(Action::NextPage));
        assert!(!ctrl.handle(Action::Quit));
    }
}
