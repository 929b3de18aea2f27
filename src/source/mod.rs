//! Data acquisition: wire types and the polling orchestrator.
//!
//! This module owns everything between the HTTP client and the app state:
//! the serde types for the five DevTrack resources, the assembled
//! [`MetricSnapshot`], and the [`Poller`] background task that fetches all
//! five concurrently on a timer and reports whole-cycle outcomes.

mod poller;
mod snapshot;

pub use poller::{cycle_token, Poller, PollerEvent, PollerHandle};
pub use snapshot::{
    ConsumerSegment, ConsumersResponse, ErrorTrendPoint, ErrorsResponse, FailingRoute,
    LatencyPoint, LatencyStats, MetricSnapshot, PerfResponse, RequestRecord, StatsResponse,
    StatsSummary, TrafficPoint, TrafficResponse,
};
