//! src/view/components/employee_form.rs
//! ============================================================================
//! # EmployeeForm: modal dialog over the working buffer
//!
//! Renders nothing while the form is closed. The focused field shows the
//! cursor; a field that failed its constraint is outlined in red with the
//! reason in its title.

use crate::model::form_state::{FormField, FormState, OpenForm};
use crate::view::{layout::centered_fixed, theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const FORM_WIDTH: u16 = 64;
const FORM_HEIGHT: u16 = 18;

pub struct EmployeeForm;

impl EmployeeForm {
    pub fn render(frame: &mut Frame<'_>, form_state: &FormState, area: Rect) {
        let Some(form) = form_state.as_open() else {
            return;
        };

        let overlay_area = centered_fixed(FORM_WIDTH, FORM_HEIGHT, area);
        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", form.title()))
            .title_alignment(Alignment::Center)
            .title_style(theme::title_style())
            .border_style(theme::form_border_style())
            .style(theme::base_style());
        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        for (field, field_area) in FormField::ALL.iter().zip(chunks.iter()) {
            Self::render_field(frame, form, *field, *field_area);
        }

        let hints = Line::from(vec![
            Span::styled("Enter", theme::field_focused_style()),
            Span::raw(format!(" {} • ", form.submit_label())),
            Span::styled("Tab", theme::field_focused_style()),
            Span::raw(" next field • "),
            Span::styled("Esc", theme::field_focused_style()),
            Span::raw(" Cancel"),
        ]);
        frame.render_widget(
            Paragraph::new(hints)
                .style(theme::muted_style())
                .alignment(Alignment::Center),
            chunks[5],
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_field(frame: &mut Frame<'_>, form: &OpenForm, field: FormField, area: Rect) {
        let focused = form.focus == field;
        let invalid = form.invalid.filter(|e| e.field == field);

        let border = match (invalid, focused) {
            (Some(_), _) => theme::field_invalid_style(),
            (None, true) => theme::field_focused_style(),
            (None, false) => theme::border_style(),
        };

        let label = match field {
            FormField::Salary => "Salary (₹)".to_string(),
            other => other.label().to_string(),
        };
        let title = match invalid {
            Some(err) => format!(" {label} · {} ", err.message),
            None => format!(" {label} "),
        };

        let value = form.buffer.value(field);
        let input = Paragraph::new(value).style(Style::default().fg(theme::FOREGROUND)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border),
        );
        frame.render_widget(input, area);

        if focused {
            let max_x = area.x + area.width.saturating_sub(2);
            let cursor_x = (area.x + 1 + value.chars().count() as u16).min(max_x);
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}
