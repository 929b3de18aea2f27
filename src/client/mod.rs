//! HTTP client for the DevTrack metrics endpoints.
//!
//! One fetch per resource per cycle, with cache-defeating query
//! parameters and headers so every cycle sees fresh data. The client
//! never retries; retry policy belongs to the poller's next cycle.
//!
//! ## Example
//!
//! ```rust,no_run
//! use devtrack_doctor::client::MetricClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MetricClient::builder()
//!         .endpoint("http://localhost:8000")
//!         .hours(24)
//!         .build();
//!
//!     let stats = client.fetch_stats(1_700_000_000_000).await?;
//!     println!("{} records", stats.entries.len());
//!     Ok(())
//! }
//! ```

mod error;

pub use error::FetchError;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL};
use serde::de::DeserializeOwned;

use crate::source::{
    ConsumersResponse, ErrorsResponse, PerfResponse, StatsResponse, TrafficResponse,
};

/// Default resource paths exposed by the DevTrack middleware.
pub const STATS_PATH: &str = "/__devtrack__/stats";
pub const TRAFFIC_PATH: &str = "/__devtrack__/metrics/traffic";
pub const ERRORS_PATH: &str = "/__devtrack__/metrics/errors";
pub const PERF_PATH: &str = "/__devtrack__/metrics/perf";
pub const CONSUMERS_PATH: &str = "/__devtrack__/consumers";

/// Client for the five DevTrack metric resources.
#[derive(Debug, Clone)]
pub struct MetricClient {
    client: reqwest::Client,
    endpoint: String,
    hours: u32,
    limit: u32,
}

impl MetricClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> MetricClientBuilder {
        MetricClientBuilder::default()
    }

    /// Returns the base URL this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the stats resource (summary + request records).
    pub async fn fetch_stats(&self, cycle_token: u64) -> Result<StatsResponse, FetchError> {
        self.get_json(self.stats_url(cycle_token)).await
    }

    /// Fetch the traffic time-series resource.
    pub async fn fetch_traffic(&self, cycle_token: u64) -> Result<TrafficResponse, FetchError> {
        self.get_json(self.series_url(TRAFFIC_PATH, cycle_token)).await
    }

    /// Fetch the error-trend resource (trends + top failing routes).
    pub async fn fetch_errors(&self, cycle_token: u64) -> Result<ErrorsResponse, FetchError> {
        self.get_json(self.series_url(ERRORS_PATH, cycle_token)).await
    }

    /// Fetch the latency-percentile resource.
    pub async fn fetch_perf(&self, cycle_token: u64) -> Result<PerfResponse, FetchError> {
        self.get_json(self.series_url(PERF_PATH, cycle_token)).await
    }

    /// Fetch the consumer-segmentation resource.
    pub async fn fetch_consumers(&self, cycle_token: u64) -> Result<ConsumersResponse, FetchError> {
        self.get_json(self.series_url(CONSUMERS_PATH, cycle_token)).await
    }

    /// URL for the stats resource: record cap plus cache-bust token.
    fn stats_url(&self, cycle_token: u64) -> String {
        format!(
            "{}{}?limit={}&_t={}",
            self.endpoint, STATS_PATH, self.limit, cycle_token
        )
    }

    /// URL for a time-series resource: lookback window plus cache-bust token.
    fn series_url(&self, path: &str, cycle_token: u64) -> String {
        format!(
            "{}{}?hours={}&_t={}",
            self.endpoint, path, self.hours, cycle_token
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let value: T = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(value)
    }
}

/// Builder for MetricClient.
#[derive(Debug, Default)]
pub struct MetricClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    hours: Option<u32>,
    limit: Option<u32>,
}

impl MetricClientBuilder {
    /// Set the base URL (e.g., "http://localhost:8000").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the lookback window for time-series resources (default: 24).
    pub fn hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Set the maximum number of request records per fetch (default: 100000).
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the client.
    pub fn build(self) -> MetricClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        // Trailing slashes would double up when paths are appended
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        MetricClient {
            client,
            endpoint,
            hours: self.hours.unwrap_or(24),
            limit: self.limit.unwrap_or(100_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = MetricClient::builder().build();
        assert_eq!(client.endpoint, "http://localhost:8000");
        assert_eq!(client.hours, 24);
        assert_eq!(client.limit, 100_000);
    }

    #[test]
    fn test_builder_custom() {
        let client = MetricClient::builder()
            .endpoint("http://api.local:9000/")
            .hours(6)
            .limit(500)
            .build();

        assert_eq!(client.endpoint, "http://api.local:9000");
        assert_eq!(client.hours, 6);
        assert_eq!(client.limit, 500);
    }

    #[test]
    fn test_stats_url_carries_limit_and_token() {
        let client = MetricClient::builder().limit(1000).build();
        let url = client.stats_url(42);
        assert_eq!(
            url,
            "http://localhost:8000/__devtrack__/stats?limit=1000&_t=42"
        );
    }

    #[test]
    fn test_series_url_carries_window_and_token() {
        let client = MetricClient::builder().hours(24).build();
        let url = client.series_url(TRAFFIC_PATH, 1234);
        assert_eq!(
            url,
            "http://localhost:8000/__devtrack__/metrics/traffic?hours=24&_t=1234"
        );
    }

    #[test]
    fn test_distinct_tokens_yield_distinct_urls() {
        let client = MetricClient::builder().build();
        assert_ne!(
            client.series_url(ERRORS_PATH, 1),
            client.series_url(ERRORS_PATH, 2)
        );
    }
}
