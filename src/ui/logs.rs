//! Logs view: filterable request-record table.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::detail::{field_label, table_cell, DISPLAY_FIELDS};
use crate::data::{MethodFilter, StatusFilter};
use crate::source::RequestRecord;
use crate::ui::chart::render_empty;
use crate::ui::format::DASH;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(area);

    render_filter_bar(frame, app, chunks[0]);

    let Some(ref snapshot) = app.snapshot else {
        render_empty(frame, &app.theme, chunks[1], "Request Logs", "Loading...");
        return;
    };

    if snapshot.entries.is_empty() {
        render_empty(
            frame,
            &app.theme,
            chunks[1],
            "Request Logs (0 records)",
            "No records returned from API.",
        );
        return;
    }

    let filtered = app.filtered_entries();
    if filtered.is_empty() {
        render_empty(
            frame,
            &app.theme,
            chunks[1],
            "Request Logs (0 records)",
            "No records match the current filters.",
        );
        return;
    }

    // Columns: the preferred display fields that actually occur in the data
    let columns = table_columns(&snapshot.entries);

    let header = Row::new(
        columns
            .iter()
            .map(|key| Cell::from(field_label(key)))
            .collect::<Vec<_>>(),
    )
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = filtered.iter().map(|entry| record_row(app, entry, &columns)).collect();

    let widths: Vec<Constraint> = columns.iter().map(|key| column_width(key)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(app.theme.selected);

    let mut state = TableState::default();
    state.select(Some(app.selected_entry_index));

    frame.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.filtered_len();
    let active = Style::default().fg(app.theme.highlight);
    let inactive = Style::default().add_modifier(Modifier::DIM);

    let mut spans = vec![
        Span::styled(
            format!(" {} record{} ", count, if count == 1 { "" } else { "s" }),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ Search: "),
    ];

    if app.filters.search_term.is_empty() {
        spans.push(Span::styled(DASH, inactive));
    } else {
        spans.push(Span::styled(app.filters.search_term.clone(), active));
    }

    spans.push(Span::raw(" │ Method: "));
    spans.push(Span::styled(
        app.filters.method.label(),
        if app.filters.method == MethodFilter::Any { inactive } else { active },
    ));

    spans.push(Span::raw(" │ Status: "));
    spans.push(Span::styled(
        app.filters.status_class.label(),
        if app.filters.status_class == StatusFilter::Any { inactive } else { active },
    ));

    if !app.filters.is_empty() {
        spans.push(Span::styled("  (c to clear)", inactive));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn record_row<'a>(app: &App, entry: &'a RequestRecord, columns: &[&'static str]) -> Row<'a> {
    let cells: Vec<Cell> = columns
        .iter()
        .map(|key| match entry.get(*key) {
            None => Cell::from(DASH),
            Some(value) => {
                let text = table_cell(key, value);
                if *key == "status_code" {
                    let style = value
                        .as_u64()
                        .map(|code| app.theme.status_code_style(code))
                        .unwrap_or_default();
                    Cell::from(text).style(style)
                } else {
                    Cell::from(text)
                }
            }
        })
        .collect();

    Row::new(cells)
}

/// The preferred display fields that occur in at least one record.
fn table_columns(entries: &[RequestRecord]) -> Vec<&'static str> {
    DISPLAY_FIELDS
        .iter()
        .copied()
        .filter(|key| entries.iter().any(|entry| entry.contains_key(*key)))
        .collect()
}

fn column_width(key: &str) -> Constraint {
    match key {
        "id" => Constraint::Length(6),
        "timestamp" | "created_at" => Constraint::Min(19),
        "method" => Constraint::Length(7),
        "status_code" => Constraint::Length(7),
        "duration_ms" => Constraint::Length(11),
        "path" => Constraint::Fill(3),
        _ => Constraint::Fill(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(json: serde_json::Value) -> RequestRecord {
        match json {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_table_columns_keep_preferred_order() {
        let entries = vec![
            record(json!({"path": "/a", "id": 1, "status_code": 200})),
            record(json!({"method": "GET", "id": 2})),
        ];

        let columns = table_columns(&entries);
        assert_eq!(columns, vec!["id", "method", "status_code", "path"]);
    }

    #[test]
    fn test_table_columns_ignore_unknown_fields() {
        let entries = vec![record(json!({"id": 1, "internal_marker": true}))];
        let columns = table_columns(&entries);
        assert_eq!(columns, vec!["id"]);
    }
}
