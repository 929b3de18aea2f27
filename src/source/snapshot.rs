//! Shared types for the DevTrack API responses and the assembled snapshot.
//!
//! These types match the JSON produced by the DevTrack middleware's five
//! read-only resources. Numeric fields are optional throughout so that a
//! value the API did not report stays distinguishable from a reported zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request-log record: an open field set with no enforced schema.
///
/// The presentation layer picks known field names out of this map; the
/// filter engine searches every field by type.
pub type RequestRecord = serde_json::Map<String, Value>;

/// Aggregate counters from the stats resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_requests: Option<u64>,
    pub unique_endpoints: Option<u64>,
    pub avg_duration_ms: Option<f64>,
    pub success_count: Option<u64>,
    pub error_count: Option<u64>,
}

/// Response of the stats resource: summary plus raw request records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub summary: StatsSummary,
    #[serde(default)]
    pub entries: Vec<RequestRecord>,
}

/// One traffic time bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    #[serde(default)]
    pub time_bucket: String,
    pub request_count: Option<u64>,
}

/// Response of the traffic resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficResponse {
    #[serde(default)]
    pub traffic: Vec<TrafficPoint>,
}

/// One error-rate time bucket. `error_rate` is a percentage in 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorTrendPoint {
    #[serde(default)]
    pub time_bucket: String,
    pub error_rate: Option<f64>,
}

/// One route in the top-failing-routes ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailingRoute {
    pub route: Option<String>,
    pub error_count: Option<u64>,
    pub error_rate: Option<f64>,
}

/// Response of the errors resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorsResponse {
    #[serde(default)]
    pub error_trends: Vec<ErrorTrendPoint>,
    #[serde(default)]
    pub top_failing_routes: Vec<FailingRoute>,
}

/// Latency percentiles for one time bucket, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyPoint {
    #[serde(default)]
    pub time_bucket: String,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
}

/// Overall latency statistics across the whole window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
    pub avg: Option<f64>,
}

/// Response of the performance resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerfResponse {
    #[serde(default)]
    pub latency_over_time: Vec<LatencyPoint>,
    pub overall_stats: Option<LatencyStats>,
}

/// One consumer segment, keyed by client identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerSegment {
    pub client_identifier: Option<String>,
    pub client_identifier_hash: Option<String>,
    pub request_count: Option<u64>,
    pub avg_latency_ms: Option<f64>,
    pub error_rate: Option<f64>,
    pub latest_ip: Option<String>,
}

/// Response of the consumers resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumersResponse {
    #[serde(default)]
    pub segments: Vec<ConsumerSegment>,
}

/// The fully assembled result of one successful acquisition cycle.
///
/// All five sub-resources belong to the same cycle token. A snapshot is
/// replaced wholesale by the next successful cycle or kept unchanged when
/// a cycle fails; fields are never mixed across cycles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub summary: StatsSummary,
    pub entries: Vec<RequestRecord>,
    pub traffic: Vec<TrafficPoint>,
    pub error_trends: Vec<ErrorTrendPoint>,
    pub top_failing_routes: Vec<FailingRoute>,
    pub latency: Vec<LatencyPoint>,
    pub overall_stats: Option<LatencyStats>,
    pub consumers: Vec<ConsumerSegment>,
}

impl MetricSnapshot {
    /// Assemble a snapshot from the five resource responses of one cycle.
    pub fn assemble(
        stats: StatsResponse,
        traffic: TrafficResponse,
        errors: ErrorsResponse,
        perf: PerfResponse,
        consumers: ConsumersResponse,
    ) -> Self {
        Self {
            summary: stats.summary,
            entries: stats.entries,
            traffic: traffic.traffic,
            error_trends: errors.error_trends,
            top_failing_routes: errors.top_failing_routes,
            latency: perf.latency_over_time,
            overall_stats: perf.overall_stats,
            consumers: consumers.segments,
        }
    }
}
