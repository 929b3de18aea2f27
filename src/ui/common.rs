//! Common UI components shared across views.
//!
//! This module contains the header bar, connection status line, tab bar,
//! bottom status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::ui::format::{format_opt_number, DASH};

/// Render the header bar with snapshot totals.
///
/// Displays: online indicator, request/endpoint/consumer counts, and a
/// loading marker while a cycle is in flight.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let dot = Span::styled(" ● ", app.theme.online_style(app.acquisition.is_online));
    let title = Span::styled("DEVTRACK ", Style::default().add_modifier(Modifier::BOLD));

    let Some(ref snapshot) = app.snapshot else {
        let line = Line::from(vec![dot, title, Span::raw("│ Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut spans = vec![
        dot,
        title,
        Span::raw("│ "),
        Span::styled(
            format_opt_number(snapshot.summary.total_requests),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" requests │ "),
        Span::raw(format!(
            "{} endpoints │ ",
            format_opt_number(snapshot.summary.unique_endpoints)
        )),
        Span::raw(format!("{} clients", snapshot.consumers.len())),
    ];

    if app.acquisition.is_loading {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "⟳ fetching",
            Style::default().fg(app.theme.highlight),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the connection status line.
///
/// Shows the error banner after a failed cycle, otherwise the endpoint
/// and the time of the last successful update.
pub fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref error) = app.acquisition.last_error {
        let line = Line::from(vec![Span::styled(
            format!(" {} ", error),
            Style::default()
                .fg(app.theme.critical)
                .add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let connection = if app.acquisition.is_online {
        Span::styled("Connected", Style::default().fg(app.theme.success))
    } else {
        Span::styled("Disconnected", Style::default().fg(app.theme.critical))
    };

    let updated = app
        .acquisition
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| DASH.to_string());

    let line = Line::from(vec![
        Span::raw(" "),
        connection,
        Span::raw(" │ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ Last updated: "),
        Span::raw(updated),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(idx, view)| Line::from(format!(" {}:{} ", idx + 1, view.label())))
        .collect();

    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the search input while it is active, temporary status messages,
/// and context-sensitive controls otherwise.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if app.search_active {
        let line = Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(app.theme.highlight)),
            Span::raw(app.filters.search_term.clone()),
            Span::styled("█", Style::default().fg(app.theme.highlight)),
            Span::styled(
                "  Enter:apply Esc:cancel",
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    // Temporary feedback takes precedence over the hint line
    if let Some(msg) = app.get_status_message() {
        let paragraph = Paragraph::new(format!(" {} ", msg))
            .style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let interval = app.acquisition.refresh_interval.as_secs();
    let interval_hint = if interval == 0 {
        "i:interval(paused)".to_string()
    } else {
        format!("i:interval({}s)", interval)
    };

    let controls = match app.current_view {
        View::Logs => format!(
            "/:search m:method x:status c:clear Enter:detail o:save r:refresh {} ?:help q:quit",
            interval_hint
        ),
        _ => format!("Tab:switch r:refresh {} ?:help q:quit", interval_hint),
    };

    let status = format!(" {} | {}", app.current_view.label(), controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1-6         Jump to a view"),
        Line::from("  ↑/↓ j/k     Navigate records"),
        Line::from("  PgUp/PgDn   Jump 10 records"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Record detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Logs",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Search across all fields"),
        Line::from("  m         Cycle method filter"),
        Line::from("  x         Cycle status filter"),
        Line::from("  c         Clear all filters"),
        Line::from("  o         Save record as HTML"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  i         Cycle refresh interval"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
