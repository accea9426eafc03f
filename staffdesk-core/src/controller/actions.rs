//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Defines the `Action` enum, which represents every user intent the
//! controller responds to. Key presses are translated into actions by the
//! key map; background task completions arrive separately as `TaskResult`s.

use crate::model::employee::{Employee, EmployeeId};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Quit the application.
    Quit,

    /// Re-read the whole collection from the backend.
    Refresh,

    /// Open the form with the empty template.
    OpenCreate,

    /// Open the form seeded with a copy of the given record.
    OpenEdit(Employee),

    /// Open the form for the row under the cursor.
    EditSelected,

    /// Hide the form and drop its buffer.
    CloseForm,

    /// Persist a record: update when it has an id, create otherwise.
    Save(Employee),

    /// Validate the working buffer and save it.
    SubmitForm,

    /// Type a character into the focused form field.
    FormInput(char),

    FormBackspace,

    FormNextField,

    FormPrevField,

    /// Ask for confirmation before deleting the record with this id.
    RequestDelete(EmployeeId),

    /// Request deletion of the row under the cursor.
    DeleteSelected,

    /// The user answered yes to the pending delete.
    ConfirmDelete,

    /// The user answered no to the pending delete.
    CancelDelete,

    PrevPage,

    NextPage,

    /// Jump to a 1-based page number.
    GoToPage(usize),

    CursorUp,

    CursorDown,

    /// Toggle the key help overlay.
    ToggleHelp,

    /// Dismiss the blocking notice.
    DismissNotice,

    /// A terminal resize event.
    Resize(u16, u16),

    /// An internal tick event for periodic updates.
    Tick,
}
