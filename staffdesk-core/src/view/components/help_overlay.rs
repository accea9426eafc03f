//! src/view/components/help_overlay.rs
//! Key help overlay

use crate::view::{layout::centered_rect, theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame<'_>, area: Rect) {
        let overlay_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, overlay_area);

        let help_paragraph = Paragraph::new(Text::from(Self::lines()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keys ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(theme::CYAN))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: false });

        frame.render_widget(help_paragraph, overlay_area);
    }

    fn section(title: &'static str) -> Line<'static> {
        Line::from(Span::styled(title, Style::default().fg(theme::CYAN)))
    }

    fn lines() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Employee Management",
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Self::section("List:"),
            Line::from("  ↑↓ / k j       Move row cursor"),
            Line::from("  ←→ / h l       Previous / next page"),
            Line::from("  1-9            Jump to page"),
            Line::from("  a              Add new employee"),
            Line::from("  e / Enter      Edit selected employee"),
            Line::from("  d / Delete     Delete selected employee"),
            Line::from("  r / F5         Refresh from server"),
            Line::from(""),
            Self::section("Form:"),
            Line::from("  Tab / ↓        Next field"),
            Line::from("  Shift+Tab / ↑  Previous field"),
            Line::from("  Enter          Save"),
            Line::from("  Esc            Cancel"),
            Line::from(""),
            Self::section("Application:"),
            Line::from("  ?              Toggle this help"),
            Line::from("  q / Ctrl+C     Quit"),
        ]
    }
}
