//! src/view/ui.rs
//! ============================================================
//! Frame renderer that draws the whole TUI from `AppState`.
//! Layout: header line, employee table, pagination bar. Overlays
//! (form, delete prompt, help, notice) are painted on top.

use std::time::{Duration, Instant};

use ratatui::{prelude::*, widgets::Paragraph};
use tracing::{instrument, trace};

use crate::{
    model::{
        app_state::AppState,
        ui_state::{NotificationLevel, UIOverlay},
    },
    view::{
        components::{
            confirm_overlay::ConfirmOverlay, employee_form::EmployeeForm,
            employee_table::EmployeeTable, help_overlay::HelpOverlay,
            notification_overlay::NotificationOverlay, pagination_bar::PaginationBar,
        },
        theme,
    },
};

const SLOW_FRAME: Duration = Duration::from_millis(16);

pub struct UIRenderer {
    cache: LayoutCache,
    stats: RenderStats,
}

#[derive(Default)]
struct LayoutCache {
    screen: Rect,
    main: [Rect; 3],
    hit: u64,
    miss: u64,
}

#[derive(Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

impl RenderStats {
    pub fn fps(&self) -> f64 {
        if self.frames > 0 && !self.total.is_zero() {
            self.frames as f64 / self.total.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UIRenderer {
    pub fn new() -> Self {
        Self {
            cache: LayoutCache::default(),
            stats: RenderStats::default(),
        }
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, frame: &mut Frame<'_>, state: &AppState) {
        let start = Instant::now();
        let [header, table, bar] = self.layout(frame.area());

        Self::draw_header(frame, header);
        EmployeeTable::new().render(frame, state, table);
        PaginationBar::new().render(frame, state, bar);
        self.draw_overlays(frame, state);

        let elapsed = start.elapsed();
        self.stats.total += elapsed;
        self.stats.frames += 1;
        if elapsed > SLOW_FRAME {
            self.stats.slow += 1;
            trace!(elapsed_ms = elapsed.as_millis() as u64, "Slow frame");
        }
    }

    fn layout(&mut self, screen: Rect) -> [Rect; 3] {
        if self.cache.screen == screen && self.cache.hit + self.cache.miss > 0 {
            self.cache.hit += 1;
            return self.cache.main;
        }
        self.cache.miss += 1;
        self.cache.screen = screen;
        self.cache.main = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(screen);
        self.cache.main
    }

    fn draw_header(frame: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" Employee Management ", theme::title_style()),
            Span::styled("  a add • e edit • d delete • r refresh", theme::muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line).style(theme::base_style()), area);
    }

    fn draw_overlays(&self, frame: &mut Frame<'_>, state: &AppState) {
        let screen = frame.area();

        if state.ui.overlay == UIOverlay::Help {
            HelpOverlay::render(frame, screen);
        }

        EmployeeForm::render(frame, &state.form, screen);

        if let Some(record) = &state.pending_delete {
            ConfirmOverlay::render(frame, record, screen);
        }

        if let Some(notice) = &state.ui.notification {
            NotificationOverlay::render(frame, notice, Self::notification_rect(screen, notice.level));
        }
    }

    fn notification_rect(screen: Rect, level: NotificationLevel) -> Rect {
        let height = if level == NotificationLevel::Error { 5 } else { 4 };
        let width = (screen.width / 10 * 6).max(30).min(screen.width);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + 2u16.min(screen.height.saturating_sub(height)),
            width,
            height: height.min(screen.height),
        }
    }
}
