pub mod error;

pub mod config;

pub mod api {
    pub mod client;
    pub use client::{ApiError, ApiResult, EmployeeApi};

    pub mod http;
    pub use http::HttpEmployeeApi;

    #[cfg(test)]
    pub mod mock;
}

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod dispatcher;
    pub use dispatcher::Controller;

    pub mod event_loop;
    pub use event_loop::{EventLoop, LoopEvent, TaskResult};

    pub mod key_map;
    pub use key_map::KeyMap;
}

pub mod model {
    pub mod app_state;

    pub mod employee;
    pub use employee::{Employee, EmployeeId};

    pub mod form_state;
    pub use form_state::{FormField, FormMode, FormState};

    pub mod pager;
    pub use pager::Pager;

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, RedrawFlag, UIOverlay, UIState};
}

pub mod tasks {
    pub mod api_task;
}

pub mod view {
    pub mod layout;

    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod confirm_overlay;
        pub use confirm_overlay::ConfirmOverlay;
        pub mod employee_form;
        pub use employee_form::EmployeeForm;
        pub mod employee_table;
        pub use employee_table::EmployeeTable;
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod pagination_bar;
        pub use pagination_bar::PaginationBar;
    }

    pub use components::*;
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, ui_state::UIState};
