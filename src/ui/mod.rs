//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: KPI cards and overall latency statistics
//! - [`traffic`]: Requests-over-time line chart
//! - [`errors`]: Error-rate chart plus top failing routes
//! - [`latency`]: p50/p95/p99 percentile chart
//! - [`consumers`]: Consumer segmentation table
//! - [`logs`]: Filterable request-record table
//! - [`detail`]: Modal overlay showing one record's fields
//! - [`common`]: Shared chrome (header, tabs, status bars, help overlay)
//! - [`chart`]: Axis/label helpers shared by the chart views
//! - [`format`]: KPI value formatting
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Status (common::render_status_line)  │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/traffic/.../logs::render)  │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod consumers;
pub mod detail;
pub mod errors;
pub mod format;
pub mod latency;
pub mod logs;
pub mod overview;
pub mod theme;
pub mod traffic;

pub use theme::Theme;
