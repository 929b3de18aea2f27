//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::detail::ValueClass;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for 2xx statuses and the online indicator.
    pub success: Color,
    /// Color for 4xx statuses.
    pub warning: Color,
    /// Color for 5xx statuses, errors, and the offline indicator.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a status code's severity class.
    pub fn status_code_style(&self, code: u64) -> Style {
        if (200..300).contains(&code) {
            Style::default().fg(self.success)
        } else if (400..500).contains(&code) {
            Style::default().fg(self.warning)
        } else if code >= 500 {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    /// Get style for a projected value class.
    pub fn value_class_style(&self, class: ValueClass) -> Style {
        match class {
            ValueClass::Status2xx => Style::default().fg(self.success),
            ValueClass::Status4xx => Style::default().fg(self.warning),
            ValueClass::Status5xx => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            ValueClass::Plain | ValueClass::Json => Style::default(),
        }
    }

    /// Style for the online/offline indicator dot.
    pub fn online_style(&self, is_online: bool) -> Style {
        if is_online {
            Style::default().fg(self.success)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }
}
