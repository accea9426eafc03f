//! src/view/components/confirm_overlay.rs
use crate::model::employee::Employee;
use crate::view::{layout::centered_fixed, theme};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Yes/no prompt shown before a delete is sent.
pub struct ConfirmOverlay;

impl ConfirmOverlay {
    pub fn render(frame: &mut Frame<'_>, record: &Employee, area: Rect) {
        let overlay_area = centered_fixed(56, 7, area);
        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .title(" Delete Employee ")
            .title_alignment(Alignment::Center)
            .title_style(theme::danger_style())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::RED))
            .style(theme::base_style());

        let text = vec![
            Line::from("Are you sure you want to delete this employee?"),
            Line::from(Span::styled(
                format!(
                    "{} {} {}",
                    record.display_id(),
                    record.first_name,
                    record.last_name
                ),
                Style::default().fg(theme::YELLOW).bold(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", theme::danger_style()),
                Span::raw(" delete  •  "),
                Span::styled("n", theme::field_focused_style()),
                Span::raw(" keep"),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            overlay_area,
        );
    }
}
