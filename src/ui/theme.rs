//! UI theme definition.

use ratatui::style::{Color, Modifier, Style};

/// Theme for the application UI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Basic styles
    pub normal_text: Style,
    pub block_style: Style,
    pub header_style: Style,
    pub label_style: Style,
    pub value_style: Style,

    // Status styles
    pub help_style: Style,
    pub status_live: Style,
    pub status_paused: Style,

    // Key styles
    pub key_style: Style,

    // Chart styles
    pub upload_style: Style,
    pub download_style: Style,
    pub axis_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Basic styles
            normal_text: Style::default().fg(Color::White),
            block_style: Style::default(),
            header_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Gray),
            value_style: Style::default().fg(Color::White),

            // Status styles
            help_style: Style::default().fg(Color::Gray),
            status_live: Style::default().fg(Color::Green),
            status_paused: Style::default().fg(Color::Yellow),

            // Key styles
            key_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),

            // Chart styles
            upload_style: Style::default().fg(Color::Magenta),
            download_style: Style::default().fg(Color::Green),
            axis_style: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Series style for a traffic direction.
    pub fn series_style(&self, direction: crate::state::Direction) -> Style {
        match direction {
            crate::state::Direction::Upload => self.upload_style,
            crate::state::Direction::Download => self.download_style,
        }
    }
}
