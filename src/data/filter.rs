//! Request-record filtering: free-text search, method, and status class.
//!
//! Filtering is a pure pass over the record list: the original ordering is
//! preserved, nothing is sorted or mutated, and the three predicates are
//! ANDed. Search is type-aware - strings match directly, anything else
//! matches against its serialized form - and always case-insensitive.

use serde_json::Value;

use crate::source::RequestRecord;

/// HTTP method filter. `Any` matches every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodFilter {
    #[default]
    Any,
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl MethodFilter {
    /// The persisted/wire form ("" for Any).
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodFilter::Any => "",
            MethodFilter::Get => "GET",
            MethodFilter::Post => "POST",
            MethodFilter::Put => "PUT",
            MethodFilter::Delete => "DELETE",
            MethodFilter::Patch => "PATCH",
        }
    }

    /// Display label for the filter bar.
    pub fn label(&self) -> &'static str {
        match self {
            MethodFilter::Any => "All",
            other => other.as_str(),
        }
    }

    /// Cycle to the next method option.
    pub fn next(self) -> Self {
        match self {
            MethodFilter::Any => MethodFilter::Get,
            MethodFilter::Get => MethodFilter::Post,
            MethodFilter::Post => MethodFilter::Put,
            MethodFilter::Put => MethodFilter::Delete,
            MethodFilter::Delete => MethodFilter::Patch,
            MethodFilter::Patch => MethodFilter::Any,
        }
    }

    /// Parse the persisted form; anything unknown maps to Any.
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => MethodFilter::Get,
            "POST" => MethodFilter::Post,
            "PUT" => MethodFilter::Put,
            "DELETE" => MethodFilter::Delete,
            "PATCH" => MethodFilter::Patch,
            _ => MethodFilter::Any,
        }
    }
}

/// Status-class filter: the hundred-digit grouping of the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Success,
    ClientError,
    ServerError,
}

impl StatusFilter {
    /// The persisted/wire form ("" for Any).
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Any => "",
            StatusFilter::Success => "2xx",
            StatusFilter::ClientError => "4xx",
            StatusFilter::ServerError => "5xx",
        }
    }

    /// Display label for the filter bar.
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Any => "All",
            StatusFilter::Success => "2xx Success",
            StatusFilter::ClientError => "4xx Client Error",
            StatusFilter::ServerError => "5xx Server Error",
        }
    }

    /// Cycle to the next status-class option.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::Any => StatusFilter::Success,
            StatusFilter::Success => StatusFilter::ClientError,
            StatusFilter::ClientError => StatusFilter::ServerError,
            StatusFilter::ServerError => StatusFilter::Any,
        }
    }

    /// Parse the persisted form; anything unknown maps to Any.
    pub fn parse(s: &str) -> Self {
        match s {
            "2xx" => StatusFilter::Success,
            "4xx" => StatusFilter::ClientError,
            "5xx" => StatusFilter::ServerError,
            _ => StatusFilter::Any,
        }
    }

    /// Whether a status code belongs to this class. A missing or zero
    /// status never matches any class; `Any` matches everything.
    pub fn matches(&self, status: Option<u64>) -> bool {
        if *self == StatusFilter::Any {
            return true;
        }
        let Some(code) = status.filter(|c| *c != 0) else {
            return false;
        };
        match self {
            StatusFilter::Any => true,
            StatusFilter::Success => (200..300).contains(&code),
            StatusFilter::ClientError => (400..500).contains(&code),
            StatusFilter::ServerError => code >= 500,
        }
    }
}

/// The three filter values an operator can set. Persisted across sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_term: String,
    pub method: MethodFilter,
    pub status_class: StatusFilter,
}

impl FilterState {
    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.method == MethodFilter::Any
            && self.status_class == StatusFilter::Any
    }

    /// Reset all three values to their empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Filter records by the current state. Pure: preserves order, never
/// mutates, and identical inputs always yield identical outputs.
pub fn filter_entries<'a>(
    entries: &'a [RequestRecord],
    state: &FilterState,
) -> Vec<&'a RequestRecord> {
    entries.iter().filter(|entry| matches(entry, state)).collect()
}

fn matches(entry: &RequestRecord, state: &FilterState) -> bool {
    if !state.search_term.is_empty() {
        let needle = state.search_term.to_lowercase();
        if !entry.values().any(|value| value_matches(value, &needle)) {
            return false;
        }
    }

    if state.method != MethodFilter::Any {
        match entry.get("method").and_then(Value::as_str) {
            Some(method) if method == state.method.as_str() => {}
            _ => return false,
        }
    }

    if state.status_class != StatusFilter::Any {
        let status = entry.get("status_code").and_then(Value::as_u64);
        if !state.status_class.matches(status) {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match against one field value.
///
/// Null never matches. Non-string values match against their serialized
/// form; a value that will not serialize is simply a non-match.
fn value_matches(value: &Value, needle: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s.to_lowercase().contains(needle),
        other => match serde_json::to_string(other) {
            Ok(serialized) => serialized.to_lowercase().contains(needle),
            Err(_) => false,
        },
    }
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

    fn sample_entries() -> Vec<RequestRecord> {
        vec![
            record(json!({"id": 1, "method": "GET", "status_code": 200, "path": "/api/users"})),
            record(json!({"id": 2, "method": "POST", "status_code": 500, "path": "/api/orders"})),
            record(json!({"id": 3, "method": "GET", "status_code": 404, "path": "/api/ghosts"})),
            record(json!({"id": 4, "method": "PUT", "path": "/api/no-status"})),
        ]
    }

    fn search(term: &str) -> FilterState {
        FilterState {
            search_term: term.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_state_passes_everything_through() {
        let entries = sample_entries();
        let filtered = filter_entries(&entries, &FilterState::default());
        assert_eq!(filtered.len(), entries.len());
    }

    #[test]
    fn test_method_filter_exact_match() {
        let entries = sample_entries();
        let state = FilterState {
            method: MethodFilter::Post,
            ..Default::default()
        };

        let filtered = filter_entries(&entries, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("id").unwrap(), 2);
    }

    #[test]
    fn test_status_class_filter() {
        let entries = sample_entries();
        let state = FilterState {
            status_class: StatusFilter::ServerError,
            ..Default::default()
        };

        let filtered = filter_entries(&entries, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("id").unwrap(), 2);
    }

    #[test]
    fn test_search_matches_numbers_after_stringification() {
        let entries = sample_entries();
        let filtered = filter_entries(&entries, &search("200"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("id").unwrap(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let entries = sample_entries();
        let filtered = filter_entries(&entries, &search("API/USERS"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("id").unwrap(), 1);
    }

    #[test]
    fn test_search_reaches_nested_values() {
        let entries = vec![
            record(json!({"id": 1, "query_params": {"user": "Alice"}})),
            record(json!({"id": 2, "query_params": {"user": "bob"}})),
        ];

        let filtered = filter_entries(&entries, &search("alice"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("id").unwrap(), 1);
    }

    #[test]
    fn test_null_fields_never_match() {
        let entries = vec![record(json!({"id": 1, "referer": null}))];
        assert!(filter_entries(&entries, &search("null")).is_empty());
    }

    #[test]
    fn test_predicates_are_anded() {
        let entries = sample_entries();
        let state = FilterState {
            search_term: "api".to_string(),
            method: MethodFilter::Get,
            status_class: StatusFilter::ClientError,
        };

        let filtered = filter_entries(&entries, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("id").unwrap(), 3);
    }

    #[test]
    fn test_missing_status_matches_no_class() {
        let entries = sample_entries();
        for class in [
            StatusFilter::Success,
            StatusFilter::ClientError,
            StatusFilter::ServerError,
        ] {
            let state = FilterState {
                status_class: class,
                ..Default::default()
            };
            let filtered = filter_entries(&entries, &state);
            assert!(filtered.iter().all(|e| e.get("id").unwrap() != 4));
        }
    }

    #[test]
    fn test_status_classes_partition_the_record_set() {
        let entries = sample_entries();
        let classes = [
            StatusFilter::Success,
            StatusFilter::ClientError,
            StatusFilter::ServerError,
        ];

        let mut matched_ids: Vec<u64> = Vec::new();
        for class in classes {
            let state = FilterState {
                status_class: class,
                ..Default::default()
            };
            for entry in filter_entries(&entries, &state) {
                let id = entry.get("id").unwrap().as_u64().unwrap();
                // Pairwise disjoint: no record matches two classes.
                assert!(!matched_ids.contains(&id));
                matched_ids.push(id);
            }
        }

        // Union of the three classes plus none-of-the-above is the full set.
        let unmatched = entries
            .iter()
            .filter(|e| {
                let id = e.get("id").unwrap().as_u64().unwrap();
                !matched_ids.contains(&id)
            })
            .count();
        assert_eq!(matched_ids.len() + unmatched, entries.len());
    }

    #[test]
    fn test_filtering_is_pure() {
        let entries = sample_entries();
        let before = serde_json::to_string(&entries).unwrap();
        let state = search("get");

        let first: Vec<u64> = filter_entries(&entries, &state)
            .iter()
            .map(|e| e.get("id").unwrap().as_u64().unwrap())
            .collect();
        let second: Vec<u64> = filter_entries(&entries, &state)
            .iter()
            .map(|e| e.get("id").unwrap().as_u64().unwrap())
            .collect();

        assert_eq!(first, second);
        assert_eq!(serde_json::to_string(&entries).unwrap(), before);
    }

    #[test]
    fn test_clear_restores_the_full_list() {
        let entries = sample_entries();
        let mut state = FilterState {
            search_term: "orders".to_string(),
            method: MethodFilter::Post,
            status_class: StatusFilter::ServerError,
        };
        assert_eq!(filter_entries(&entries, &state).len(), 1);

        state.clear();
        assert!(state.is_empty());
        assert_eq!(filter_entries(&entries, &state).len(), entries.len());
    }

    #[test]
    fn test_ordering_is_preserved() {
        let entries = sample_entries();
        let state = FilterState {
            method: MethodFilter::Get,
            ..Default::default()
        };

        let ids: Vec<u64> = filter_entries(&entries, &state)
            .iter()
            .map(|e| e.get("id").unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_status_class_boundaries() {
        assert!(StatusFilter::Success.matches(Some(200)));
        assert!(StatusFilter::Success.matches(Some(299)));
        assert!(!StatusFilter::Success.matches(Some(300)));
        assert!(!StatusFilter::ClientError.matches(Some(399)));
        assert!(StatusFilter::ClientError.matches(Some(400)));
        assert!(!StatusFilter::ClientError.matches(Some(500)));
        assert!(StatusFilter::ServerError.matches(Some(500)));
        assert!(StatusFilter::ServerError.matches(Some(599)));
        assert!(!StatusFilter::ServerError.matches(Some(0)));
        assert!(!StatusFilter::ServerError.matches(None));
    }
}
