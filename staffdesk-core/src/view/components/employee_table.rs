//! src/view/components/employee_table.rs

use crate::{model::app_state::AppState, view::theme};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

pub const EMPTY_MESSAGE: &str = "No employees found.";

/// Read-only table over the current page of the authoritative list.
pub struct EmployeeTable;

impl EmployeeTable {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let page = state.page_rows();

        let header = Row::new(vec!["ID", "First Name", "Last Name", "Email", "Salary"])
            .style(theme::table_header_style())
            .bottom_margin(1);

        let rows: Vec<Row> = page
            .iter()
            .map(|emp| {
                Row::new(vec![
                    Cell::from(emp.display_id()).style(Style::default().bold()),
                    Cell::from(emp.first_name.as_str()),
                    Cell::from(emp.last_name.as_str()),
                    Cell::from(emp.email.as_str()),
                    Cell::from(Line::from(emp.display_salary()).right_aligned()),
                ])
                .style(Style::default().fg(theme::FOREGROUND))
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Length(16),
        ];

        let selected = (!page.is_empty()).then_some(state.row_cursor);
        let mut table_state = TableState::default().with_selected(selected);

        let total_badge = Line::from(Span::styled(
            format!(" Total: {} ", state.total()),
            theme::badge_style(),
        ))
        .right_aligned();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(" Employee List ").left_aligned())
            .title(total_badge)
            .title_style(theme::title_style())
            .border_style(theme::border_style())
            .style(theme::base_style());
        let inner = block.inner(area);

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut table_state);

        // Below the header and its margin.
        if page.is_empty() && inner.height > 2 {
            let message_area = Rect {
                y: inner.y + 2,
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(EMPTY_MESSAGE)
                    .style(theme::muted_style())
                    .alignment(Alignment::Center),
                message_area,
            );
        }
    }
}

impl Default for EmployeeTable {
    fn default() -> Self {
        Self::new()
    }
}
