//! src/view/components/pagination_bar.rs
//! Pagination controls and request status
//!
//! The left half shows `« Prev 1 2 3 Next »` with the current page
//! highlighted and unreachable directions dimmed. Page controls only appear
//! when there is more than one page. The right half shows in-flight request
//! count and the time of the last successful refresh.

use crate::{model::app_state::AppState, view::theme};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub struct PaginationBar;

impl PaginationBar {
    pub fn new() -> Self {
        Self
    }

    /// Spans for the page controls; empty when there is a single page.
    pub fn page_spans(state: &AppState) -> Vec<Span<'static>> {
        let pages = state.page_count();
        if pages <= 1 {
            return Vec::new();
        }

        let pager = &state.pager;
        let total = state.total();
        let enabled = |on: bool| {
            if on {
                Style::default().fg(theme::CYAN)
            } else {
                theme::disabled_style()
            }
        };

        let mut spans = Vec::with_capacity(pages + 2);
        spans.push(Span::styled("« Prev ", enabled(pager.has_prev())));
        for page in 1..=pages {
            let style = if page == pager.current() {
                theme::active_page_style()
            } else {
                Style::default().fg(theme::FOREGROUND)
            };
            spans.push(Span::styled(format!(" {page} "), style));
        }
        spans.push(Span::styled(" Next »", enabled(pager.has_next(total))));
        spans
    }

    pub fn render(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        Paragraph::new(Line::from(Self::page_spans(state)))
            .style(theme::base_style())
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        let mut right = Vec::with_capacity(2);
        if state.in_flight > 0 {
            right.push(format!("⟳ {}", state.in_flight));
        }
        match state.last_refreshed {
            Some(at) => right.push(format!("Updated {}", at.format("%H:%M:%S"))),
            None => right.push("Not loaded".to_string()),
        }
        right.push("? help".to_string());

        Paragraph::new(right.join(" | "))
            .style(theme::base_style().fg(theme::COMMENT))
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for PaginationBar {
    fn default() -> Self {
        Self::new()
    }
}
