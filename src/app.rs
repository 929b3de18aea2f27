//! Application state and navigation logic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use serde_json::Value;

use crate::data::detail;
use crate::data::{filter_entries, FilterState, FilterStore};
use crate::source::{MetricSnapshot, PollerEvent, PollerHandle, RequestRecord};
use crate::ui::Theme;

/// Refresh interval options cycled by the UI, in seconds. Zero pauses
/// automatic refresh.
pub const REFRESH_STEPS: &[u64] = &[5, 10, 30, 60, 0];

/// The current view/tab in the TUI.
///
/// Record detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// KPI cards and overall latency statistics.
    Overview,
    /// Requests over time.
    Traffic,
    /// Error rate over time plus top failing routes.
    Errors,
    /// Latency percentiles over time.
    Latency,
    /// Consumer segmentation table.
    Consumers,
    /// Request log table with filters.
    Logs,
}

impl View {
    /// All views in tab order.
    pub const ALL: [View; 6] = [
        View::Overview,
        View::Traffic,
        View::Errors,
        View::Latency,
        View::Consumers,
        View::Logs,
    ];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Traffic => "Traffic",
            View::Errors => "Errors",
            View::Latency => "Latency",
            View::Consumers => "Consumers",
            View::Logs => "Logs",
        }
    }
}

/// Connection and refresh state, driven solely by poller events and
/// interval changes.
#[derive(Debug, Clone)]
pub struct AcquisitionState {
    /// False after a failed cycle, true again once a cycle starts/settles.
    pub is_online: bool,
    /// Wall-clock time of the last settled cycle.
    pub last_updated: Option<DateTime<Local>>,
    /// True while a cycle's fetches are in flight.
    pub is_loading: bool,
    /// Message of the last failed cycle, cleared when a new cycle starts.
    pub last_error: Option<String>,
    /// Current timer period. Zero means manual refresh only.
    pub refresh_interval: Duration,
}

impl AcquisitionState {
    fn new(refresh_interval: Duration) -> Self {
        Self {
            is_online: true,
            last_updated: None,
            is_loading: false,
            last_error: None,
            refresh_interval,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Acquisition
    poller: PollerHandle,
    pub snapshot: Option<MetricSnapshot>,
    pub acquisition: AcquisitionState,

    // Record filters
    pub filters: FilterState,
    store: FilterStore,
    pub search_active: bool,

    // Navigation state (Logs view)
    pub selected_entry_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around a running poller. Filter values are
    /// restored from the store; missing entries load as empty.
    pub fn new(poller: PollerHandle, store: FilterStore, refresh_interval: Duration) -> Self {
        let filters = store.load();
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            poller,
            snapshot: None,
            acquisition: AcquisitionState::new(refresh_interval),
            filters,
            store,
            search_active: false,
            selected_entry_index: 0,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the polled endpoint.
    pub fn source_description(&self) -> &str {
        self.poller.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain pending poller events and apply them to the app state.
    pub fn pump_poller(&mut self) {
        while let Some(event) = self.poller.poll() {
            self.apply_event(event);
        }
    }

    /// Apply one cycle event.
    ///
    /// A failed cycle leaves the current snapshot untouched; only a
    /// settled cycle replaces it, wholesale.
    pub fn apply_event(&mut self, event: PollerEvent) {
        match event {
            PollerEvent::CycleStarted => {
                self.acquisition.is_loading = true;
                self.acquisition.is_online = true;
                self.acquisition.last_error = None;
            }
            PollerEvent::Settled(snapshot) => {
                self.snapshot = Some(*snapshot);
                self.acquisition.is_loading = false;
                self.acquisition.is_online = true;
                self.acquisition.last_updated = Some(Local::now());
                self.acquisition.last_error = None;
                self.clamp_selection();
            }
            PollerEvent::Failed(message) => {
                self.acquisition.is_loading = false;
                self.acquisition.is_online = false;
                self.acquisition.last_error = Some(message);
            }
        }
    }

    /// Request an immediate acquisition cycle.
    pub fn refresh(&self) {
        self.poller.refresh();
    }

    /// Cycle the refresh interval through the preset steps, re-arming the
    /// poller timer immediately.
    pub fn cycle_refresh_interval(&mut self) {
        let current = self.acquisition.refresh_interval.as_secs();
        let next = match REFRESH_STEPS.iter().position(|s| *s == current) {
            Some(idx) => REFRESH_STEPS[(idx + 1) % REFRESH_STEPS.len()],
            None => REFRESH_STEPS[0],
        };

        let interval = Duration::from_secs(next);
        self.acquisition.refresh_interval = interval;
        self.poller.set_interval(interval);

        let message = if next == 0 {
            "Auto-refresh paused".to_string()
        } else {
            format!("Auto-refresh every {}s", next)
        };
        self.set_status_message(message);
    }

    /// Abort the poller task. Pending fetch results are discarded.
    pub fn shutdown(&mut self) {
        self.poller.shutdown();
    }

    /// The snapshot's records after applying the current filters.
    /// Ordering is the API's; nothing is sorted or mutated.
    pub fn filtered_entries(&self) -> Vec<&RequestRecord> {
        match self.snapshot {
            Some(ref snapshot) => filter_entries(&snapshot.entries, &self.filters),
            None => Vec::new(),
        }
    }

    /// Number of records after filtering.
    pub fn filtered_len(&self) -> usize {
        self.filtered_entries().len()
    }

    /// The currently selected record, if any.
    pub fn selected_record(&self) -> Option<&RequestRecord> {
        self.filtered_entries()
            .get(self.selected_entry_index)
            .copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_len();
        if self.selected_entry_index >= len {
            self.selected_entry_index = len.saturating_sub(1);
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one record.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one record.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n records.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.filtered_len().saturating_sub(1);
        self.selected_entry_index = (self.selected_entry_index + n).min(max);
    }

    /// Move selection up by n records.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_entry_index = self.selected_entry_index.saturating_sub(n);
    }

    /// Jump to the first record.
    pub fn select_first(&mut self) {
        self.selected_entry_index = 0;
    }

    /// Jump to the last record.
    pub fn select_last(&mut self) {
        self.selected_entry_index = self.filtered_len().saturating_sub(1);
    }

    /// Open the detail overlay for the selected record.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Logs && self.selected_record().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then fall back to Overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Overview {
            self.current_view = View::Overview;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter search input mode (starts capturing keystrokes).
    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    /// Exit search input mode without clearing the term.
    pub fn cancel_search(&mut self) {
        self.search_active = false;
    }

    /// Append a character to the search term. Persisted immediately.
    pub fn search_push(&mut self, c: char) {
        self.filters.search_term.push(c);
        self.persist_filters();
    }

    /// Remove the last character of the search term. Persisted immediately.
    pub fn search_pop(&mut self) {
        self.filters.search_term.pop();
        self.persist_filters();
    }

    /// Clear the search term and exit input mode. Persisted immediately
    /// (as an empty string - distinct from clearing all filters).
    pub fn clear_search(&mut self) {
        self.filters.search_term.clear();
        self.search_active = false;
        self.persist_filters();
    }

    /// Cycle the method filter. Persisted immediately.
    pub fn cycle_method(&mut self) {
        self.filters.method = self.filters.method.next();
        self.persist_filters();
    }

    /// Cycle the status-class filter. Persisted immediately.
    pub fn cycle_status(&mut self) {
        self.filters.status_class = self.filters.status_class.next();
        self.persist_filters();
    }

    /// Reset all filters and remove their storage keys.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search_active = false;
        self.store.clear();
        self.clamp_selection();
    }

    fn persist_filters(&mut self) {
        self.store.save(&self.filters);
        self.clamp_selection();
    }

    /// Write the selected record as a standalone HTML detail page.
    pub fn export_selected_detail(&self) -> Result<PathBuf> {
        let Some(record) = self.selected_record() else {
            anyhow::bail!("No record selected");
        };

        let id = record
            .get("id")
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "record".to_string());
        // Keep the file name shell-safe regardless of what the id holds
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let path = PathBuf::from(format!("devtrack_record_{}.html", safe_id));
        std::fs::write(&path, detail::render_html_page(record))?;
        Ok(path)
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> App {
        let store = FilterStore::new(dir.path().join("filters.json"));
        App::new(PollerHandle::detached(), store, Duration::from_secs(5))
    }

    fn sample_snapshot() -> MetricSnapshot {
        serde_json::from_value(json!({
            "summary": {
                "total_requests": 3,
                "success_count": 2,
                "error_count": 1
            },
            "entries": [
                {"id": 1, "method": "GET", "status_code": 200, "path": "/api/users"},
                {"id": 2, "method": "POST", "status_code": 500, "path": "/api/orders"},
                {"id": 3, "method": "GET", "status_code": 404, "path": "/api/ghosts"}
            ],
            "traffic": [],
            "error_trends": [],
            "top_failing_routes": [],
            "latency": [],
            "consumers": []
        }))
        .unwrap()
    }

    #[test]
    fn test_settled_cycle_replaces_snapshot_and_state() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.apply_event(PollerEvent::CycleStarted);
        assert!(app.acquisition.is_loading);

        app.apply_event(PollerEvent::Settled(Box::new(sample_snapshot())));
        assert!(!app.acquisition.is_loading);
        assert!(app.acquisition.is_online);
        assert!(app.acquisition.last_updated.is_some());
        assert!(app.acquisition.last_error.is_none());
        assert_eq!(app.snapshot.as_ref().unwrap().entries.len(), 3);
    }

    #[test]
    fn test_failed_cycle_keeps_snapshot_untouched() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.apply_event(PollerEvent::Settled(Box::new(sample_snapshot())));
        let before = serde_json::to_string(app.snapshot.as_ref().unwrap()).unwrap();

        app.apply_event(PollerEvent::CycleStarted);
        app.apply_event(PollerEvent::Failed(
            "HTTP 503: Service Unavailable".to_string(),
        ));

        let after = serde_json::to_string(app.snapshot.as_ref().unwrap()).unwrap();
        assert_eq!(before, after);
        assert!(!app.acquisition.is_online);
        assert!(app
            .acquisition
            .last_error
            .as_ref()
            .unwrap()
            .contains("503"));
    }

    #[test]
    fn test_new_cycle_clears_the_error_banner() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.apply_event(PollerEvent::Failed("HTTP 503: Service Unavailable".into()));
        assert!(app.acquisition.last_error.is_some());

        app.apply_event(PollerEvent::CycleStarted);
        assert!(app.acquisition.last_error.is_none());
        assert!(app.acquisition.is_online);
    }

    #[test]
    fn test_filters_narrow_and_clear_restores() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.apply_event(PollerEvent::Settled(Box::new(sample_snapshot())));

        app.cycle_method(); // GET
        assert_eq!(app.filtered_len(), 2);

        app.clear_filters();
        assert!(app.filters.is_empty());
        assert_eq!(app.filtered_len(), 3);
    }

    #[test]
    fn test_selection_clamps_when_filter_shrinks_the_list() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.apply_event(PollerEvent::Settled(Box::new(sample_snapshot())));

        app.select_last();
        assert_eq!(app.selected_entry_index, 2);

        for c in "orders".chars() {
            app.search_push(c);
        }
        assert_eq!(app.filtered_len(), 1);
        assert_eq!(app.selected_entry_index, 0);
    }

    #[test]
    fn test_filter_state_round_trips_through_the_store() {
        let dir = TempDir::new().unwrap();
        {
            let mut app = test_app(&dir);
            for c in "api".chars() {
                app.search_push(c);
            }
            app.cycle_method(); // GET
            app.cycle_status(); // 2xx
        }

        let reloaded = test_app(&dir);
        assert_eq!(reloaded.filters.search_term, "api");
        assert_eq!(reloaded.filters.method, crate::data::MethodFilter::Get);
        assert_eq!(
            reloaded.filters.status_class,
            crate::data::StatusFilter::Success
        );
    }

    #[test]
    fn test_clear_filters_round_trips_as_empty() {
        let dir = TempDir::new().unwrap();
        {
            let mut app = test_app(&dir);
            for c in "api".chars() {
                app.search_push(c);
            }
            app.clear_filters();
        }

        let reloaded = test_app(&dir);
        assert!(reloaded.filters.is_empty());
    }

    #[test]
    fn test_detail_overlay_requires_a_selected_record() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.set_view(View::Logs);
        app.enter_detail();
        assert!(!app.show_detail_overlay);

        app.apply_event(PollerEvent::Settled(Box::new(sample_snapshot())));
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Logs);
    }

    #[test]
    fn test_refresh_interval_cycles_through_steps() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        assert_eq!(app.acquisition.refresh_interval, Duration::from_secs(5));
        app.cycle_refresh_interval();
        assert_eq!(app.acquisition.refresh_interval, Duration::from_secs(10));
        app.cycle_refresh_interval();
        app.cycle_refresh_interval();
        app.cycle_refresh_interval();
        assert_eq!(app.acquisition.refresh_interval, Duration::ZERO);
        app.cycle_refresh_interval();
        assert_eq!(app.acquisition.refresh_interval, Duration::from_secs(5));
    }
}
