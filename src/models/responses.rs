//! Response DTOs for the lookup service API
//!
//! Defines the structure of outgoing HTTP response bodies. The lookup and
//! metrics endpoints serialize their domain types directly; this module
//! holds the composed and static shapes.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /users/cache-status
///
/// Merges the cache counters with the average response time, matching the
/// combined view the operations endpoint has always served.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatusResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
    pub hit_rate: f64,
    pub average_response_time_ms: f64,
}

impl CacheStatusResponse {
    /// Builds the response from a cache snapshot and the metrics average.
    pub fn new(stats: &CacheStats, average_response_time_ms: f64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            size: stats.size,
            hit_rate: stats.hit_rate(),
            average_response_time_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
