//! Traffic view: request counts over time.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::data::metrics::traffic_series;
use crate::ui::chart::{render_empty, x_axis_labels, x_bound, y_axis_labels, y_bound};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        render_empty(frame, &app.theme, area, "Traffic Overview", "Loading...");
        return;
    };

    let series = traffic_series(&snapshot.traffic);
    if series.is_empty() {
        render_empty(
            frame,
            &app.theme,
            area,
            "Traffic Overview",
            "No traffic data available. Trigger some requests to see the chart.",
        );
        return;
    }

    let points = series.points();
    let datasets = vec![Dataset::default()
        .name("Requests")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.highlight))
        .data(&points)];

    let max = y_bound(series.max_value());
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Traffic Overview (requests over time) ")
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
                .labels(y_axis_labels(max, "")),
        );

    frame.render_widget(chart, area);
}
