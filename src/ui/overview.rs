//! Overview view: KPI cards and overall latency statistics.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Kpis;
use crate::ui::chart::render_empty;
use crate::ui::format::{format_opt_ms, format_opt_number, format_opt_percent};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        render_empty(
            frame,
            &app.theme,
            area,
            "Overview",
            "Waiting for the first snapshot...",
        );
        return;
    };

    let kpis = Kpis::from_summary(&snapshot.summary);

    let chunks = Layout::vertical([
        Constraint::Length(5), // KPI cards
        Constraint::Length(4), // Overall latency
        Constraint::Min(0),
    ])
    .split(area);

    render_kpi_cards(frame, app, &kpis, chunks[0]);
    render_overall_stats(frame, app, chunks[1]);
}

fn render_kpi_cards(frame: &mut Frame, app: &App, kpis: &Kpis, area: Rect) {
    let cards = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .split(area);

    let total_sub = format!(
        "Success: {}, Error: {}",
        format_opt_number(kpis.success_count),
        format_opt_number(kpis.error_count)
    );

    render_card(
        frame,
        app,
        cards[0],
        "Total Requests",
        &format_opt_number(kpis.total_requests),
        &total_sub,
        None,
    );
    render_card(
        frame,
        app,
        cards[1],
        "Unique Endpoints",
        &format_opt_number(kpis.unique_endpoints),
        "Observed in this sample",
        None,
    );
    render_card(
        frame,
        app,
        cards[2],
        "Average Latency",
        &format_opt_ms(kpis.avg_duration_ms),
        "From DevTrack summary",
        Some(app.theme.highlight),
    );
    render_card(
        frame,
        app,
        cards[3],
        "Error Rate",
        &format_opt_percent(kpis.error_rate),
        "error_count / total_requests",
        Some(app.theme.critical),
    );
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &str,
    value: &str,
    sub: &str,
    accent: Option<Color>,
) {
    let value_style = match accent {
        Some(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
        None => Style::default().add_modifier(Modifier::BOLD),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", label),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(format!(" {}", value), value_style)),
        Line::from(Span::styled(
            format!(" {}", sub),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_overall_stats(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let line = match snapshot.overall_stats {
        Some(ref stats) => Line::from(vec![
            Span::raw(" p50: "),
            Span::styled(
                format_opt_ms(stats.p50),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    p95: "),
            Span::styled(
                format_opt_ms(stats.p95),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    p99: "),
            Span::styled(
                format_opt_ms(stats.p99),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    avg: "),
            Span::styled(
                format_opt_ms(stats.avg),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            " No latency statistics available.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let block = Block::default()
        .title(" Overall Latency ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(vec![Line::from(""), line]).block(block),
        area,
    );
}
