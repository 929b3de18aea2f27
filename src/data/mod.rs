//! Data derivation and presentation logic.
//!
//! This module turns raw snapshots into what the UI actually shows:
//!
//! - [`metrics`]: KPI derivation and chart series preparation
//! - [`filter`]: the request-record filter engine
//! - [`store`]: filter persistence across sessions
//! - [`detail`]: per-record detail projection (overlay and HTML paths)

pub mod detail;
pub mod filter;
pub mod metrics;
pub mod store;

pub use filter::{filter_entries, FilterState, MethodFilter, StatusFilter};
pub use metrics::Kpis;
pub use store::FilterStore;
