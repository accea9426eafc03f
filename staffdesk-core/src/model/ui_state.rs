//! src/model/ui_state.rs
//! UI-only state: redraw flags, overlays and the blocking notice

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use compact_str::CompactString;
use tracing::debug;

/// Atomic redraw flags for lock-free UI updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Main = 1,
    StatusBar = 2,
    Overlay = 4,
    Notification = 8,
    All = 15,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Non-form overlays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIOverlay {
    #[default]
    None = 0,
    Help = 1,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Success = 0,
    Error = 1,
}

/// Compact notification with timestamp
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    /// Error notices stay up until a key press dismisses them.
    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.auto_dismiss_ms.is_none()
    }
}

#[derive(Debug)]
pub struct UIState {
    pub redraw_flags: AtomicU32,

    pub overlay: UIOverlay,
    pub notification: Option<Notification>,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            redraw_flags: AtomicU32::new(RedrawFlag::All.bits() as u32),
            overlay: UIOverlay::None,
            notification: None,
        }
    }
}

impl UIState {
    #[inline]
    pub fn request_redraw(&self, flag: RedrawFlag) {
        self.redraw_flags
            .fetch_or(flag.bits() as u32, Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_flags.load(Ordering::Relaxed) != 0
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw_flags.store(0, Ordering::Relaxed);
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            UIOverlay::Help => UIOverlay::None,
            UIOverlay::None => UIOverlay::Help,
        };
        self.request_redraw(RedrawFlag::Overlay);
    }

    /// Replaces the current notification. An auto-dismissing one never
    /// displaces a blocking notice the user has not dismissed yet; returns
    /// `false` when it was dropped for that reason.
    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss_ms: Option<u32>,
    ) -> bool {
        let message = message.into();
        if auto_dismiss_ms.is_some() && self.blocking_notice().is_some() {
            debug!(%message, "Notification suppressed behind blocking notice");
            return false;
        }

        self.notification = Some(Notification {
            message,
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
        self.request_redraw(RedrawFlag::Notification);
        true
    }

    #[inline]
    pub fn show_success(&mut self, message: impl Into<CompactString>) -> bool {
        self.show_notification(message, NotificationLevel::Success, Some(2000))
    }

    /// Blocking: stays until dismissed.
    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Error, None);
    }

    /// The notice that currently swallows input, if any.
    pub fn blocking_notice(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_blocking())
    }

    pub fn dismiss_notification(&mut self) -> bool {
        if self.notification.take().is_some() {
            self.request_redraw(RedrawFlag::All);
            true
        } else {
            false
        }
    }

    /// Drops an expired auto-dismiss notification. Returns `true` if one went.
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification
            && let Some(auto_dismiss_ms) = notification.auto_dismiss_ms
            && notification.timestamp.elapsed().as_millis() > u128::from(auto_dismiss_ms)
        {
            self.notification = None;
            self.request_redraw(RedrawFlag::All);
            return true;
        }
        false
    }
}
