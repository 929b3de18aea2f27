//! Detail projection: format one request record for display.
//!
//! One projection feeds two consumers: the in-app overlay, which renders
//! plain text, and the standalone HTML page, where every interpolated
//! value must be escaped before it is embedded in markup. Formatting never
//! fails - a value that resists a rule falls through to its plain string
//! form.

use serde_json::Value;

use crate::source::RequestRecord;

use super::metrics::parse_bucket;

/// Placeholder shown for absent values.
pub const DASH: &str = "–";

/// Fields shown in the request-log table, in preferred order. Fields not
/// listed here are available through the detail projection only.
pub const DISPLAY_FIELDS: &[&str] = &[
    "id",
    "timestamp",
    "method",
    "status_code",
    "path",
    "duration_ms",
    "client_ip",
    "user_id",
    "trace_id",
    "created_at",
];

/// Never displayed, even when present on a record.
pub const SUPPRESSED_FIELD: &str = "client_identifier_hash";

/// Known field labels; anything else falls back to title case.
const FIELD_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("path", "Path"),
    ("path_pattern", "Path Pattern"),
    ("method", "Method"),
    ("status_code", "Status"),
    ("timestamp", "Timestamp"),
    ("client_ip", "Client IP"),
    ("duration_ms", "Duration"),
    ("user_agent", "User Agent"),
    ("referer", "Referer"),
    ("query_params", "Query Params"),
    ("path_params", "Path Params"),
    ("request_body", "Request Body"),
    ("response_size", "Response Size"),
    ("user_id", "User ID"),
    ("role", "Role"),
    ("trace_id", "Trace ID"),
    ("client_identifier", "Client Identifier"),
];

/// Style class attached to a projected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Plain,
    Status2xx,
    Status4xx,
    Status5xx,
    /// Pretty-printed JSON; rendered preformatted.
    Json,
}

/// One formatted field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    pub class: ValueClass,
}

/// Project a record into display fields, in record field order.
/// The suppressed field is dropped on every path.
pub fn project(record: &RequestRecord) -> Vec<DetailField> {
    record
        .iter()
        .filter(|(key, _)| key.as_str() != SUPPRESSED_FIELD)
        .map(|(key, value)| {
            let (value, class) = format_value(key, value);
            DetailField {
                label: field_label(key),
                value,
                class,
            }
        })
        .collect()
}

/// Display label for a field name.
pub fn field_label(key: &str) -> String {
    FIELD_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| title_case(key))
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format one field value, applying the rules in priority order:
/// null, timestamp field, duration field, status field, container, plain.
pub fn format_value(key: &str, value: &Value) -> (String, ValueClass) {
    if value.is_null() {
        return (DASH.to_string(), ValueClass::Plain);
    }

    match key {
        "timestamp" | "created_at" => {
            return (format_timestamp(value), ValueClass::Plain);
        }
        "duration_ms" | "duration" => {
            if let Some(n) = value.as_f64() {
                return (format!("{:.2} ms", n), ValueClass::Plain);
            }
        }
        "status_code" => {
            if let Some(code) = value.as_u64() {
                return (code.to_string(), status_class(code));
            }
        }
        _ => {}
    }

    if value.is_object() || value.is_array() {
        let text =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        return (text, ValueClass::Json);
    }

    (plain_string(value), ValueClass::Plain)
}

/// Compact cell text for the log table. Containers are summarized instead
/// of serialized so rows stay one line tall.
pub fn table_cell(key: &str, value: &Value) -> String {
    match value {
        Value::Null => DASH.to_string(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => format!("{{{} keys}}", map.len()),
        _ => format_value(key, value).0,
    }
}

/// Severity class for a status code.
pub fn status_class(code: u64) -> ValueClass {
    if (200..300).contains(&code) {
        ValueClass::Status2xx
    } else if (400..500).contains(&code) {
        ValueClass::Status4xx
    } else if code >= 500 {
        ValueClass::Status5xx
    } else {
        ValueClass::Plain
    }
}

/// The value's plain string form: strings unquoted, everything else as
/// its JSON rendering.
fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_timestamp(value: &Value) -> String {
    match value {
        Value::String(s) => parse_bucket(s)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| s.clone()),
        Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| n.to_string()),
        other => plain_string(other),
    }
}

/// Escape a string for embedding in raw markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a record as a standalone HTML detail page.
///
/// This is the raw-markup consumer of the projection: every interpolated
/// value goes through [`escape_html`], including the record id in the
/// title.
pub fn render_html_page(record: &RequestRecord) -> String {
    let entry_id = record
        .get("id")
        .map(plain_string)
        .unwrap_or_else(|| "N/A".to_string());
    let escaped_id = escape_html(&entry_id);

    let mut fields_html = String::new();
    for field in project(record) {
        let class_attr = match field.class {
            ValueClass::Status2xx => " status-2xx",
            ValueClass::Status4xx => " status-4xx",
            ValueClass::Status5xx => " status-5xx",
            _ => "",
        };
        let escaped_value = escape_html(&field.value);
        let value_html = if field.class == ValueClass::Json {
            format!("<pre>{}</pre>", escaped_value)
        } else {
            escaped_value
        };
        fields_html.push_str(&format!(
            "<div class=\"field\"><div class=\"field-label\">{}</div><div class=\"field-value{}\">{}</div></div>\n",
            escape_html(&field.label),
            class_attr,
            value_html,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Request Details - ID: {escaped_id}</title>
<style>
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; background: #0f172a; color: #e2e8f0; padding: 20px; }}
.container {{ max-width: 1200px; margin: 0 auto; }}
h1 {{ color: #f1f5f9; margin-bottom: 10px; font-size: 24px; }}
.subtitle {{ color: #94a3b8; margin-bottom: 30px; font-size: 14px; }}
.field {{ border-bottom: 1px solid #1e293b; padding: 15px 0; }}
.field:last-child {{ border-bottom: none; }}
.field-label {{ font-size: 11px; text-transform: uppercase; color: #64748b; margin-bottom: 8px; letter-spacing: 0.5px; font-weight: 600; }}
.field-value {{ font-size: 14px; color: #e2e8f0; word-break: break-word; }}
.field-value pre {{ background: #020617; padding: 15px; border-radius: 8px; overflow-x: auto; font-size: 12px; font-family: "Courier New", monospace; border: 1px solid #1e293b; white-space: pre-wrap; }}
.status-2xx {{ color: #4ade80; }}
.status-4xx {{ color: #fbbf24; }}
.status-5xx {{ color: #f87171; }}
</style>
</head>
<body>
<div class="container">
<h1>Request Details</h1>
<div class="subtitle">Log ID: {escaped_id}</div>
{fields_html}</div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(json: serde_json::Value) -> RequestRecord {
        match json {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_known_labels_and_title_case_fallback() {
        assert_eq!(field_label("status_code"), "Status");
        assert_eq!(field_label("client_ip"), "Client IP");
        assert_eq!(field_label("custom_audit_flag"), "Custom Audit Flag");
    }

    #[test]
    fn test_null_formats_as_dash() {
        let (value, class) = format_value("referer", &Value::Null);
        assert_eq!(value, DASH);
        assert_eq!(class, ValueClass::Plain);
    }

    #[test]
    fn test_timestamp_field_formats_as_datetime() {
        let (value, _) = format_value("timestamp", &json!("2025-06-01T10:30:45"));
        assert_eq!(value, "2025-06-01 10:30:45");
    }

    #[test]
    fn test_unparseable_timestamp_falls_back_to_raw() {
        let (value, _) = format_value("timestamp", &json!("soon"));
        assert_eq!(value, "soon");
    }

    #[test]
    fn test_duration_formats_with_two_decimals() {
        let (value, _) = format_value("duration_ms", &json!(12.3456));
        assert_eq!(value, "12.35 ms");
        let (value, _) = format_value("duration_ms", &json!(3));
        assert_eq!(value, "3.00 ms");
    }

    #[test]
    fn test_status_codes_carry_severity_classes() {
        assert_eq!(format_value("status_code", &json!(204)).1, ValueClass::Status2xx);
        assert_eq!(format_value("status_code", &json!(404)).1, ValueClass::Status4xx);
        assert_eq!(format_value("status_code", &json!(503)).1, ValueClass::Status5xx);
        assert_eq!(format_value("status_code", &json!(301)).1, ValueClass::Plain);
    }

    #[test]
    fn test_containers_pretty_print_as_json() {
        let (value, class) = format_value("query_params", &json!({"page": "2"}));
        assert_eq!(class, ValueClass::Json);
        assert!(value.contains("\"page\": \"2\""));
    }

    #[test]
    fn test_plain_strings_stay_unquoted() {
        let (value, class) = format_value("path", &json!("/api/users"));
        assert_eq!(value, "/api/users");
        assert_eq!(class, ValueClass::Plain);
    }

    #[test]
    fn test_projection_preserves_field_order_and_suppresses_hash() {
        let rec = record(json!({
            "id": 9,
            "client_identifier_hash": "abc123",
            "path": "/api/users",
            "status_code": 200
        }));

        let fields = project(&rec);
        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["ID", "Path", "Status"]);
    }

    #[test]
    fn test_table_cell_summarizes_containers() {
        assert_eq!(table_cell("tags", &json!(["a", "b", "c"])), "[3 items]");
        assert_eq!(table_cell("query_params", &json!({})), "{}");
        assert_eq!(
            table_cell("query_params", &json!({"a": 1, "b": 2})),
            "{2 keys}"
        );
        assert_eq!(table_cell("referer", &Value::Null), DASH);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#039;y&#039;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_html_page_escapes_record_content() {
        let rec = record(json!({
            "id": "<img src=x>",
            "path": "/api/<script>evil()</script>"
        }));

        let html = render_html_page(&rec);
        assert!(!html.contains("<script>evil"));
        assert!(html.contains("&lt;script&gt;evil()&lt;/script&gt;"));
        assert!(html.contains("Request Details - ID: &lt;img src=x&gt;"));
    }

    #[test]
    fn test_html_page_wraps_json_values_in_pre() {
        let rec = record(json!({"id": 1, "query_params": {"q": "<b>"}}));
        let html = render_html_page(&rec);
        assert!(html.contains("<pre>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_html_page_never_shows_suppressed_field() {
        let rec = record(json!({"id": 1, "client_identifier_hash": "deadbeef"}));
        let html = render_html_page(&rec);
        assert!(!html.contains("deadbeef"));
    }
}
