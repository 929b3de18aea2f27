//! Detail overlay rendering.
//!
//! Displays a modal overlay with every field of the selected request
//! record, formatted by the detail projection. This is the safe-text
//! consumer of the projection; the escaped HTML page shares the same
//! projection through `data::detail::render_html_page`.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::detail::{format_value, project};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the record detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let filtered_len = app.filtered_len();
    let Some(record) = app.selected_record() else {
        return;
    };

    // Width: 90% of screen, clamped to [MIN_OVERLAY_WIDTH, 110]
    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 110);
    // Height: 90% of screen, clamped to [MIN_OVERLAY_HEIGHT, 50]
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 50);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header with record id
        Constraint::Min(10),   // Field list
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER =====
    let log_id = record
        .get("id")
        .map(|v| format_value("id", v).0)
        .unwrap_or_else(|| "N/A".to_string());

    let header_block = Block::default()
        .title(" Request Details ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let header = Paragraph::new(Line::from(vec![
        Span::raw(" Log ID: "),
        Span::styled(log_id, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(
                "    (record {} of {})",
                app.selected_entry_index + 1,
                filtered_len
            ),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]))
    .block(header_block);
    frame.render_widget(header, chunks[0]);

    // ===== FIELDS =====
    let mut lines: Vec<Line> = Vec::new();
    for field in project(record) {
        lines.push(Line::from(Span::styled(
            format!(" {}", field.label.to_uppercase()),
            Style::default().add_modifier(Modifier::DIM),
        )));
        let value_style = app.theme.value_class_style(field.class);
        for value_line in field.value.lines() {
            lines.push(Line::from(Span::styled(
                format!("   {}", value_line),
                value_style,
            )));
        }
        lines.push(Line::from(""));
    }

    let body_block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(body_block), chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Esc:close  j/k:prev/next record  o:save as HTML ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
