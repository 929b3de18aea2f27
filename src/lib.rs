// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # devtrack-doctor
//!
//! A diagnostic TUI and library for monitoring a DevTrack metrics API.
//!
//! This crate polls the five read-only DevTrack resources (stats, traffic,
//! errors, performance, consumers), assembles them into consistent
//! snapshots, derives KPIs, and renders traffic/latency/error/consumer
//! views in an interactive terminal UI with filterable request logs.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(derive/  │    │(render) │    │         │  │
//! │  └────┬────┘    │ filter)  │    └─────────┘    └─────────┘  │
//! │       │         └──────────┘                                 │
//! │       ▼                                                      │
//! │  ┌─────────┐      ┌─────────┐                                │
//! │  │ source  │◀─────│ client  │◀── DevTrack HTTP API           │
//! │  │(poller) │      │(reqwest)│                                │
//! │  └─────────┘      └─────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`client`]**: HTTP client for the five metric resources, with
//!   cache-defeating request semantics and a typed error taxonomy
//! - **[`source`]**: Wire types, the assembled [`MetricSnapshot`], and the
//!   [`Poller`] task that fetches all five resources concurrently per cycle
//! - **[`data`]**: KPI derivation, the record filter engine, filter
//!   persistence, and the per-record detail projection
//! - **[`ui`]**: Terminal rendering using ratatui - charts, tables, overlays,
//!   and theme support
//!
//! ## Cycle semantics
//!
//! A cycle succeeds only when all five fetches succeed; its snapshot then
//! replaces the previous one wholesale. A cycle that fails on any resource
//! leaves the previous snapshot untouched and surfaces the error as a
//! banner. Cycles never overlap.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Point the dashboard at a service with the DevTrack middleware
//! devtrack-doctor --url http://localhost:8000
//!
//! # Slower refresh, shorter lookback window
//! devtrack-doctor --refresh 30 --hours 6
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::time::Duration;
//! use devtrack_doctor::{App, FilterStore, MetricClient, Poller};
//!
//! # tokio_test::block_on(async {
//! let client = MetricClient::builder()
//!     .endpoint("http://localhost:8000")
//!     .build();
//! let poller = Poller::spawn(client, Duration::from_secs(5));
//! let store = FilterStore::new("devtrack_filters.json");
//! let app = App::new(poller, store, Duration::from_secs(5));
//! # });
//! ```

pub mod app;
pub mod client;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{AcquisitionState, App, View};
pub use client::{FetchError, MetricClient};
pub use data::{
    filter_entries, FilterState, FilterStore, Kpis, MethodFilter, StatusFilter,
};
pub use source::{
    MetricSnapshot, Poller, PollerEvent, PollerHandle, RequestRecord, StatsSummary,
};
