//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! This module defines the color constants for the Catppuccin Mocha theme.
//! Colors are from the official Catppuccin palette:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PINK: Color = Color::Rgb(245, 194, 231); // Pink
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn base_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

pub fn border_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn title_style() -> Style {
    Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
}

pub fn table_header_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub fn table_highlight_style() -> Style {
    Style::default().bg(CURRENT_LINE).add_modifier(Modifier::BOLD)
}

pub fn badge_style() -> Style {
    Style::default().bg(FOREGROUND).fg(BACKGROUND)
}

pub fn muted_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn disabled_style() -> Style {
    Style::default().fg(CURRENT_LINE)
}

pub fn active_page_style() -> Style {
    Style::default()
        .bg(PURPLE)
        .fg(BACKGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn form_border_style() -> Style {
    Style::default().fg(PURPLE)
}

pub fn field_focused_style() -> Style {
    Style::default().fg(CYAN)
}

pub fn field_invalid_style() -> Style {
    Style::default().fg(RED)
}

pub fn danger_style() -> Style {
    Style::default().fg(RED).add_modifier(Modifier::BOLD)
}
