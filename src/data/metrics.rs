//! Derived metrics: KPIs and chart series computed from a snapshot.
//!
//! Everything here is a pure function of snapshot fields. Percentiles and
//! error rates arrive pre-computed from the API; no resampling happens on
//! this side. The one derivation is the headline error rate, which must
//! distinguish "no data" from an actual 0%.

use chrono::NaiveDateTime;

use crate::source::{ErrorTrendPoint, LatencyPoint, StatsSummary, TrafficPoint};

/// Headline indicators derived from the stats summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub total_requests: Option<u64>,
    pub unique_endpoints: Option<u64>,
    pub avg_duration_ms: Option<f64>,
    pub success_count: Option<u64>,
    pub error_count: Option<u64>,
    /// `error_count / total_requests * 100`. None when the denominator is
    /// zero or either side is absent; never a silent 0 or NaN.
    pub error_rate: Option<f64>,
}

impl Kpis {
    /// Derive the KPI set from a stats summary.
    pub fn from_summary(summary: &StatsSummary) -> Self {
        let error_rate = match (summary.total_requests, summary.error_count) {
            (Some(total), Some(errors)) if total > 0 => {
                Some(errors as f64 / total as f64 * 100.0)
            }
            _ => None,
        };

        Self {
            total_requests: summary.total_requests,
            unique_endpoints: summary.unique_endpoints,
            avg_duration_ms: summary.avg_duration_ms,
            success_count: summary.success_count,
            error_count: summary.error_count,
            error_rate,
        }
    }
}

/// A prepared chart series: one label and one y value per time bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Points in chart coordinates, x = bucket index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        index_points(&self.values)
    }

    /// The largest y value, or 0 for an empty series.
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Map y values to (index, y) chart points.
pub fn index_points(values: &[f64]) -> Vec<(f64, f64)> {
    values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect()
}

/// Traffic buckets as a request-count series. Missing counts chart as 0.
pub fn traffic_series(points: &[TrafficPoint]) -> Series {
    Series {
        labels: points.iter().map(|p| bucket_label(&p.time_bucket)).collect(),
        values: points
            .iter()
            .map(|p| p.request_count.unwrap_or(0) as f64)
            .collect(),
    }
}

/// Error-trend buckets as a percentage series. Missing rates chart as 0.
pub fn error_rate_series(points: &[ErrorTrendPoint]) -> Series {
    Series {
        labels: points.iter().map(|p| bucket_label(&p.time_bucket)).collect(),
        values: points.iter().map(|p| p.error_rate.unwrap_or(0.0)).collect(),
    }
}

/// The three latency percentile series, sharing one label set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencySeries {
    pub labels: Vec<String>,
    pub p50: Vec<f64>,
    pub p95: Vec<f64>,
    pub p99: Vec<f64>,
}

impl LatencySeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// The largest value across all three percentile lines.
    pub fn max_value(&self) -> f64 {
        self.p50
            .iter()
            .chain(self.p95.iter())
            .chain(self.p99.iter())
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Latency buckets as p50/p95/p99 series. Missing percentiles chart as 0.
pub fn latency_series(points: &[LatencyPoint]) -> LatencySeries {
    LatencySeries {
        labels: points.iter().map(|p| bucket_label(&p.time_bucket)).collect(),
        p50: points.iter().map(|p| p.p50.unwrap_or(0.0)).collect(),
        p95: points.iter().map(|p| p.p95.unwrap_or(0.0)).collect(),
        p99: points.iter().map(|p| p.p99.unwrap_or(0.0)).collect(),
    }
}

/// Format a time bucket as HH:MM, falling back to the raw string when the
/// timestamp cannot be parsed.
pub fn bucket_label(bucket: &str) -> String {
    parse_bucket(bucket)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| bucket.to_string())
}

/// Parse the timestamp formats the API is known to emit.
pub(crate) fn parse_bucket(bucket: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(bucket) {
        return Some(dt.naive_local());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(bucket, format) {
            return Some(dt);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: Option<u64>, errors: Option<u64>) -> StatsSummary {
        StatsSummary {
            total_requests: total,
            error_count: errors,
            ..Default::default()
        }
    }

    #[test]
    fn test_error_rate_computed_when_both_present() {
        let kpis = Kpis::from_summary(&summary(Some(200), Some(30)));
        let rate = kpis.error_rate.unwrap();
        assert!((rate - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_error_rate_absent_when_total_is_zero() {
        let kpis = Kpis::from_summary(&summary(Some(0), Some(5)));
        assert_eq!(kpis.error_rate, None);
    }

    #[test]
    fn test_error_rate_absent_when_either_side_missing() {
        assert_eq!(Kpis::from_summary(&summary(None, Some(5))).error_rate, None);
        assert_eq!(
            Kpis::from_summary(&summary(Some(100), None)).error_rate,
            None
        );
    }

    #[test]
    fn test_error_rate_zero_when_no_errors() {
        // A real 0% is still reported - only absence of data maps to None.
        let kpis = Kpis::from_summary(&summary(Some(100), Some(0)));
        assert_eq!(kpis.error_rate, Some(0.0));
    }

    #[test]
    fn test_traffic_series_defaults_missing_counts_to_zero() {
        let points = vec![
            TrafficPoint {
                time_bucket: "2025-06-01T10:00:00".to_string(),
                request_count: Some(7),
            },
            TrafficPoint {
                time_bucket: "2025-06-01T11:00:00".to_string(),
                request_count: None,
            },
        ];

        let series = traffic_series(&points);
        assert_eq!(series.values, vec![7.0, 0.0]);
        assert_eq!(series.labels, vec!["10:00", "11:00"]);
        assert_eq!(series.points(), vec![(0.0, 7.0), (1.0, 0.0)]);
    }

    #[test]
    fn test_error_rate_series_defaults_missing_rates_to_zero() {
        let points = vec![
            ErrorTrendPoint {
                time_bucket: "2025-06-01T10:00:00".to_string(),
                error_rate: Some(12.5),
            },
            ErrorTrendPoint {
                time_bucket: "2025-06-01T11:00:00".to_string(),
                error_rate: None,
            },
        ];

        let series = error_rate_series(&points);
        assert_eq!(series.values, vec![12.5, 0.0]);
        assert!((series.max_value() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_latency_series_keeps_lines_aligned() {
        let points = vec![LatencyPoint {
            time_bucket: "2025-06-01 10:00:00".to_string(),
            p50: Some(10.0),
            p95: None,
            p99: Some(90.0),
        }];

        let series = latency_series(&points);
        assert_eq!(series.p50, vec![10.0]);
        assert_eq!(series.p95, vec![0.0]);
        assert_eq!(series.p99, vec![90.0]);
        assert!((series.max_value() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_label_formats() {
        assert_eq!(bucket_label("2025-06-01T10:30:00"), "10:30");
        assert_eq!(bucket_label("2025-06-01 10:30:00"), "10:30");
        assert_eq!(bucket_label("2025-06-01T10:30:00.123456"), "10:30");
        assert_eq!(bucket_label("2025-06-01T10:30:00+02:00"), "10:30");
    }

    #[test]
    fn test_bucket_label_falls_back_to_raw_string() {
        assert_eq!(bucket_label("bucket-3"), "bucket-3");
    }
}
