//! Latency view: p50/p95/p99 percentiles over time.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::data::metrics::{index_points, latency_series};
use crate::ui::chart::{render_empty, x_axis_labels, x_bound, y_axis_labels, y_bound};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        render_empty(frame, &app.theme, area, "Performance", "Loading...");
        return;
    };

    let series = latency_series(&snapshot.latency);
    if series.is_empty() {
        render_empty(
            frame,
            &app.theme,
            area,
            "Performance",
            "No latency data available.",
        );
        return;
    }

    let p50 = index_points(&series.p50);
    let p95 = index_points(&series.p95);
    let p99 = index_points(&series.p99);

    let datasets = vec![
        Dataset::default()
            .name("p50")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.highlight))
            .data(&p50),
        Dataset::default()
            .name("p95")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.warning))
            .data(&p95),
        Dataset::default()
            .name("p99")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.critical))
            .data(&p99),
    ];

    let max = y_bound(series.max_value());
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Performance (latency percentiles over time) ")
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
                .bounds([0.0, max])
                .labels(y_axis_labels(max, " ms")),
        );

    frame.render_widget(chart, area);
}
