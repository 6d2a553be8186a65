//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub cache_capacity: usize,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Items drained from the upstream queue per batch cycle
    pub batch_size: usize,
    /// Simulated backend latency per batch cycle, in milliseconds
    pub batch_latency_ms: u64,
    /// Long admission window in seconds
    pub long_window_secs: u64,
    /// Admissions allowed inside the long window
    pub long_window_limit: usize,
    /// Burst admission window in seconds
    pub burst_window_secs: u64,
    /// Admissions allowed inside the burst window
    pub burst_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_SECS` - Cache TTL in seconds (default: 60)
    /// - `SWEEP_INTERVAL_SECS` - Expiry sweep frequency (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `BATCH_SIZE` - Upstream queue batch size (default: 3)
    /// - `BATCH_LATENCY_MS` - Simulated backend latency (default: 200)
    /// - `LONG_WINDOW_SECS` / `LONG_WINDOW_LIMIT` - 60s window, 10 requests
    /// - `BURST_WINDOW_SECS` / `BURST_LIMIT` - 10s window, 5 requests
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl_secs: env_or("CACHE_TTL_SECS", defaults.cache_ttl_secs),
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            batch_size: env_or("BATCH_SIZE", defaults.batch_size),
            batch_latency_ms: env_or("BATCH_LATENCY_MS", defaults.batch_latency_ms),
            long_window_secs: env_or("LONG_WINDOW_SECS", defaults.long_window_secs),
            long_window_limit: env_or("LONG_WINDOW_LIMIT", defaults.long_window_limit),
            burst_window_secs: env_or("BURST_WINDOW_SECS", defaults.burst_window_secs),
            burst_limit: env_or("BURST_LIMIT", defaults.burst_limit),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 100,
            cache_ttl_secs: 60,
            sweep_interval_secs: 5,
            server_port: 3001,
            batch_size: 3,
            batch_latency_ms: 200,
            long_window_secs: 60,
            long_window_limit: 10,
            burst_window_secs: 10,
            burst_limit: 5,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
