//! Shared helpers for the line-chart views.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::Theme;

/// Pick first / middle / last labels for the x axis.
pub fn x_axis_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

/// Evenly spaced y-axis labels for a 0..max range.
pub fn y_axis_labels(max: f64, unit: &str) -> Vec<String> {
    [0.0, max / 2.0, max]
        .iter()
        .map(|v| format!("{:.0}{}", v, unit))
        .collect()
}

/// Upper y bound with a little headroom, never zero.
pub fn y_bound(max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Upper x bound for an index-based series.
pub fn x_bound(len: usize) -> f64 {
    len.saturating_sub(1).max(1) as f64
}

/// Render the placeholder for a view with no data.
pub fn render_empty(frame: &mut Frame, theme: &Theme, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{:02}:00", i)).collect()
    }

    #[test]
    fn test_x_axis_labels_picks_endpoints_and_middle() {
        assert!(x_axis_labels(&labels(0)).is_empty());
        assert_eq!(x_axis_labels(&labels(1)), vec!["00:00"]);
        assert_eq!(
            x_axis_labels(&labels(5)),
            vec!["00:00", "02:00", "04:00"]
        );
    }

    #[test]
    fn test_y_bound_never_collapses() {
        assert_eq!(y_bound(0.0), 1.0);
        assert!((y_bound(100.0) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_x_bound_handles_short_series() {
        assert_eq!(x_bound(0), 1.0);
        assert_eq!(x_bound(1), 1.0);
        assert_eq!(x_bound(10), 9.0);
    }
}
