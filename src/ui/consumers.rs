//! Consumers view: per-client segmentation table.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::chart::render_empty;
use crate::ui::format::DASH;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        render_empty(frame, &app.theme, area, "Consumer Segmentation", "Loading...");
        return;
    };

    if snapshot.consumers.is_empty() {
        render_empty(
            frame,
            &app.theme,
            area,
            "Consumer Segmentation (0 clients)",
            "No consumer data available.",
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Client Identifier"),
        Cell::from("Requests"),
        Cell::from("Avg Latency"),
        Cell::from("Error Rate"),
        Cell::from("Public IP"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = snapshot
        .consumers
        .iter()
        .map(|segment| {
            // Prefer the readable identifier, fall back to its hash
            let identifier = segment
                .client_identifier
                .clone()
                .or_else(|| segment.client_identifier_hash.clone())
                .unwrap_or_else(|| DASH.to_string());

            Row::new(vec![
                Cell::from(identifier),
                Cell::from(segment.request_count.unwrap_or(0).to_string()),
                Cell::from(
                    segment
                        .avg_latency_ms
                        .map(|v| format!("{:.2} ms", v))
                        .unwrap_or_else(|| DASH.to_string()),
                ),
                Cell::from(format!("{:.2}%", segment.error_rate.unwrap_or(0.0)))
                    .style(Style::default().fg(app.theme.critical)),
                Cell::from(segment.latest_ip.clone().unwrap_or_else(|| DASH.to_string())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(12),
        Constraint::Fill(2),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(
                " Consumer Segmentation ({} clients) ",
                snapshot.consumers.len()
            ))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}
