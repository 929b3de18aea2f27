//! Filter persistence backed by a small JSON state file.
//!
//! The store mirrors the dashboard's three filter values under independent
//! keys. Every mutation is written through immediately; there is no
//! debounce. Clearing removes the keys instead of writing empty strings,
//! so an explicitly cleared state stays distinguishable on disk from one
//! that was never set (loading treats both as empty).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use super::filter::{FilterState, MethodFilter, StatusFilter};

/// Storage key for the search term.
pub const SEARCH_KEY: &str = "devtrack_search";
/// Storage key for the method filter.
pub const METHOD_KEY: &str = "devtrack_method";
/// Storage key for the status-class filter.
pub const STATUS_KEY: &str = "devtrack_status";

/// File-backed store for the three filter values.
#[derive(Debug, Clone)]
pub struct FilterStore {
    path: PathBuf,
}

impl FilterStore {
    /// Create a store over the given file path. The file is created on the
    /// first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted filter state. Missing file or missing keys load
    /// as empty values.
    pub fn load(&self) -> FilterState {
        let map = self.read_map();
        FilterState {
            search_term: map
                .get(SEARCH_KEY)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            method: MethodFilter::parse(
                map.get(METHOD_KEY).and_then(Value::as_str).unwrap_or(""),
            ),
            status_class: StatusFilter::parse(
                map.get(STATUS_KEY).and_then(Value::as_str).unwrap_or(""),
            ),
        }
    }

    /// Write all three values through to disk.
    pub fn save(&self, state: &FilterState) {
        let mut map = self.read_map();
        map.insert(
            SEARCH_KEY.to_string(),
            Value::String(state.search_term.clone()),
        );
        map.insert(
            METHOD_KEY.to_string(),
            Value::String(state.method.as_str().to_string()),
        );
        map.insert(
            STATUS_KEY.to_string(),
            Value::String(state.status_class.as_str().to_string()),
        );
        self.write_map(map);
    }

    /// Remove the three keys. Other keys in the file are left untouched.
    pub fn clear(&self) {
        let mut map = self.read_map();
        map.remove(SEARCH_KEY);
        map.remove(METHOD_KEY);
        map.remove(STATUS_KEY);
        self.write_map(map);
    }

    fn read_map(&self) -> Map<String, Value> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Map::new(),
        }
    }

    fn write_map(&self, map: Map<String, Value>) {
        let json = match serde_json::to_string_pretty(&Value::Object(map)) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize filter state");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "failed to persist filter state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FilterStore {
        FilterStore::new(dir.path().join("filters.json"))
    }

    #[test]
    fn test_load_without_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let state = store.load();
        assert!(state.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let state = FilterState {
            search_term: "orders".to_string(),
            method: MethodFilter::Post,
            status_class: StatusFilter::ServerError,
        };
        store.save(&state);

        // A fresh store over the same file reproduces the state.
        let reloaded = store_in(&dir).load();
        assert_eq!(reloaded, state);
    }

    #[test]
    fn test_clear_removes_the_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&FilterState {
            search_term: "x".to_string(),
            ..Default::default()
        });
        store.clear();

        // Keys are gone from disk, not just emptied.
        let raw = fs::read_to_string(store.path()).unwrap();
        let map: Map<String, Value> = serde_json::from_str(&raw).unwrap();
        assert!(!map.contains_key(SEARCH_KEY));
        assert!(!map.contains_key(METHOD_KEY));
        assert!(!map.contains_key(STATUS_KEY));

        // And loading after a clear yields the all-empty state.
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_preserves_foreign_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), r#"{"other_tool": "keep-me"}"#).unwrap();
        store.save(&FilterState::default());
        store.clear();

        let raw = fs::read_to_string(store.path()).unwrap();
        let map: Map<String, Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.get("other_tool").unwrap(), "keep-me");
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unknown_persisted_values_load_as_empty_filters() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(
            store.path(),
            r#"{"devtrack_method": "TRACE", "devtrack_status": "3xx"}"#,
        )
        .unwrap();

        let state = store.load();
        assert_eq!(state.method, MethodFilter::Any);
        assert_eq!(state.status_class, StatusFilter::Any);
    }
}
