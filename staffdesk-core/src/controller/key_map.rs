//! src/controller/key_map.rs
//! Translates key presses into actions for whichever surface has focus

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::controller::actions::Action;
use crate::model::app_state::{AppState, Focus};

pub struct KeyMap {
    list_bindings: HashMap<KeyEvent, Action>,
    unhandled_count: u64,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    pub fn new() -> Self {
        let mut list_bindings = HashMap::with_capacity(24);

        list_bindings.insert(key('q'), Action::Quit);
        list_bindings.insert(key('a'), Action::OpenCreate);
        list_bindings.insert(key('r'), Action::Refresh);
        list_bindings.insert(code(KeyCode::F(5)), Action::Refresh);
        list_bindings.insert(key('e'), Action::EditSelected);
        list_bindings.insert(code(KeyCode::Enter), Action::EditSelected);
        list_bindings.insert(key('d'), Action::DeleteSelected);
        list_bindings.insert(code(KeyCode::Delete), Action::DeleteSelected);
        list_bindings.insert(code(KeyCode::Left), Action::PrevPage);
        list_bindings.insert(key('h'), Action::PrevPage);
        list_bindings.insert(code(KeyCode::PageUp), Action::PrevPage);
        list_bindings.insert(code(KeyCode::Right), Action::NextPage);
        list_bindings.insert(key('l'), Action::NextPage);
        list_bindings.insert(code(KeyCode::PageDown), Action::NextPage);
        list_bindings.insert(code(KeyCode::Up), Action::CursorUp);
        list_bindings.insert(key('k'), Action::CursorUp);
        list_bindings.insert(code(KeyCode::Down), Action::CursorDown);
        list_bindings.insert(key('j'), Action::CursorDown);
        list_bindings.insert(key('?'), Action::ToggleHelp);
        for digit in 1..=9u8 {
            list_bindings.insert(
                key(char::from(b'0' + digit)),
                Action::GoToPage(usize::from(digit)),
            );
        }

        Self {
            list_bindings,
            unhandled_count: 0,
        }
    }

    /// Maps `key_event` to an action for the surface that currently has focus.
    pub fn map(&mut self, state: &AppState, key_event: KeyEvent) -> Option<Action> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(Action::Quit);
        }

        let action = match state.focus() {
            Focus::Notice => Some(Action::DismissNotice),
            Focus::ConfirmDelete => Self::map_confirm(key_event),
            Focus::Form => Self::map_form(key_event),
            Focus::Help => match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
                _ => None,
            },
            Focus::List => self.list_bindings.get(&normalize(key_event)).cloned(),
        };

        if action.is_none() {
            self.unhandled_count += 1;
            trace!(unhandled = self.unhandled_count, "Unbound key: {:?}", key_event);
        }
        action
    }

    fn map_confirm(key_event: KeyEvent) -> Option<Action> {
        match key_event.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CancelDelete),
            _ => None,
        }
    }

    fn map_form(key_event: KeyEvent) -> Option<Action> {
        match key_event.code {
            KeyCode::Esc => Some(Action::CloseForm),
            KeyCode::Enter => Some(Action::SubmitForm),
            KeyCode::Tab | KeyCode::Down => Some(Action::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FormPrevField),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(ch)
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::FormInput(ch))
            }
            _ => None,
        }
    }
}

/// Drops SHIFT and the event kind so `?` matches however the terminal reports it.
fn normalize(key_event: KeyEvent) -> KeyEvent {
    let modifiers = if matches!(key_event.code, KeyCode::Char(_)) {
        key_event.modifiers - KeyModifiers::SHIFT
    } else {
        key_event.modifiers
    };
    KeyEvent::new(key_event.code, modifiers)
}

fn key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
}

fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
