//! Errors view: error-rate trend chart plus the top failing routes.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::metrics::error_rate_series;
use crate::source::FailingRoute;
use crate::ui::chart::{render_empty, x_axis_labels, x_bound};
use crate::ui::format::DASH;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        render_empty(frame, &app.theme, area, "Error Trends", "Loading...");
        return;
    };

    if snapshot.error_trends.is_empty() && snapshot.top_failing_routes.is_empty() {
        render_empty(
            frame,
            &app.theme,
            area,
            "Error Trends",
            "No error data available.",
        );
        return;
    }

    if snapshot.top_failing_routes.is_empty() {
        render_chart(frame, app, area);
        return;
    }
    if snapshot.error_trends.is_empty() {
        render_routes(frame, app, &snapshot.top_failing_routes, area);
        return;
    }

    let chunks =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area);
    render_chart(frame, app, chunks[0]);
    render_routes(frame, app, &snapshot.top_failing_routes, chunks[1]);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let series = error_rate_series(&snapshot.error_trends);
    let points = series.points();
    let datasets = vec![Dataset::default()
        .name("Error Rate (%)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.critical))
        .data(&points)];

    // Percentage axis is pinned to 0-100 regardless of the data
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Error Trends (failure rates over time) ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_bound(series.len())])
                .labels(x_axis_labels(&series.labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, 100.0])
                .labels(["0%", "50%", "100%"]),
        );

    frame.render_widget(chart, area);
}

fn render_routes(frame: &mut Frame, app: &App, routes: &[FailingRoute], area: Rect) {
    let header = Row::new(vec![
        Cell::from("Route"),
        Cell::from("Errors"),
        Cell::from("Error Rate"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = routes
        .iter()
        .map(|route| {
            Row::new(vec![
                Cell::from(route.route.clone().unwrap_or_else(|| DASH.to_string())),
                Cell::from(route.error_count.unwrap_or(0).to_string()),
                Cell::from(
                    route
                        .error_rate
                        .map(|r| format!("{:.2}%", r))
                        .unwrap_or_else(|| DASH.to_string()),
                )
                .style(Style::default().fg(app.theme.critical)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Top Failing Routes ({}) ", routes.len()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}
