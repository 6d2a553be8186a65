//! Metrics Aggregator Module
//!
//! Process-wide request counters: total requests, response-time sum, a
//! status-class histogram and uptime. Constructed once inside the service
//! context and mutated by every completed request regardless of which path
//! produced it.

use std::time::Instant;

use serde::Serialize;

// == Status Classes ==
/// Histogram of responses by status class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusClassCounts {
    #[serde(rename = "2xx")]
    pub success: u64,
    #[serde(rename = "3xx")]
    pub redirect: u64,
    #[serde(rename = "4xx")]
    pub client_error: u64,
    #[serde(rename = "5xx")]
    pub server_error: u64,
    /// Anything outside the 2xx-5xx classes
    pub other: u64,
}

// == Metrics Snapshot ==
/// Read-only view returned by `snapshot`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub average_response_time_ms: f64,
    pub status_distribution: StatusClassCounts,
    pub uptime_secs: u64,
}

// == Metrics Aggregator ==
/// Cumulative request accounting, zeroed only by an explicit reset.
#[derive(Debug)]
pub struct MetricsAggregator {
    started: Instant,
    total_requests: u64,
    total_response_time_ms: u64,
    classes: StatusClassCounts,
}

impl MetricsAggregator {
    // == Constructor ==
    /// Creates an aggregator whose uptime starts now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            total_requests: 0,
            total_response_time_ms: 0,
            classes: StatusClassCounts::default(),
        }
    }

    // == Record ==
    /// Records one completed request.
    pub fn record(&mut self, status: u16, duration_ms: u64) {
        self.total_requests += 1;
        self.total_response_time_ms += duration_ms;

        match status / 100 {
            2 => self.classes.success += 1,
            3 => self.classes.redirect += 1,
            4 => self.classes.client_error += 1,
            5 => self.classes.server_error += 1,
            _ => self.classes.other += 1,
        }
    }

    // == Snapshot ==
    /// Point-in-time view of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let average_response_time_ms = if self.total_requests > 0 {
            self.total_response_time_ms as f64 / self.total_requests as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            total_requests: self.total_requests,
            average_response_time_ms,
            status_distribution: self.classes.clone(),
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }

    // == Reset ==
    /// Zeroes every counter. The uptime origin is deliberately kept.
    pub fn reset(&mut self) {
        self.total_requests = 0;
        self.total_response_time_ms = 0;
        self.classes = StatusClassCounts::default();
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
