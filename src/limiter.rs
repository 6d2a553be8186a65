//! Rate Limiter Module
//!
//! Per-client admission control over two nested sliding windows: a long
//! window (default 10 requests per 60s) and a burst window (default 5
//! requests per 10s). Boundary counts deny, so the limiter fails closed.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

// == Decision ==
/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request admitted; a timestamp was consumed.
    Allow,
    /// Request denied; no timestamp was consumed.
    Deny(DenyReason),
}

/// Which window caused a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The 60-second window is at its limit.
    LongWindow,
    /// The 10-second burst window is at its limit.
    Burst,
}

impl DenyReason {
    /// Stable wire identifier for the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::LongWindow => "long-window",
            DenyReason::Burst => "burst",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Limiter Config ==
/// Window sizes and limits.
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    /// Long trailing window
    pub long_window: Duration,
    /// Admissions allowed inside the long window
    pub long_limit: usize,
    /// Burst trailing window, nested inside the long one
    pub burst_window: Duration,
    /// Admissions allowed inside the burst window
    pub burst_limit: usize,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            long_window: Duration::from_secs(60),
            long_limit: 10,
            burst_window: Duration::from_secs(10),
            burst_limit: 5,
        }
    }
}

// == Rate Limiter ==
/// Dual-window admission controller.
///
/// State is per-process and in-memory only; a restart resets every client.
/// All operations are synchronous; the service provides exclusion.
#[derive(Debug, Default)]
pub struct RateLimiter {
    config: LimiterConfig,
    /// Admission timestamps per client, oldest first
    windows: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter with the given window configuration.
    pub fn new(config: LimiterConfig) -> Self {
        Self {
            config,
            windows: HashMap::new(),
        }
    }

    // == Admit ==
    /// Decides whether a client's request is admitted right now.
    pub fn admit(&mut self, client_id: &str) -> Decision {
        self.admit_at(client_id, Instant::now())
    }

    /// Admission check against an explicit instant. Exposed for tests so
    /// window behavior can be exercised without sleeping.
    pub fn admit_at(&mut self, client_id: &str, now: Instant) -> Decision {
        let window = self.windows.entry(client_id.to_string()).or_default();

        // Prune everything that fell out of the long window. Timestamps at
        // exactly the cutoff are dropped (fail-closed pruning keeps the
        // retained set strictly inside the trailing interval).
        if let Some(cutoff) = now.checked_sub(self.config.long_window) {
            while window.front().is_some_and(|ts| *ts <= cutoff) {
                window.pop_front();
            }
        }

        if window.len() >= self.config.long_limit {
            return Decision::Deny(DenyReason::LongWindow);
        }

        let burst_count = match now.checked_sub(self.config.burst_window) {
            Some(cutoff) => window.iter().rev().take_while(|ts| **ts > cutoff).count(),
            // Process younger than the burst window: everything counts
            None => window.len(),
        };
        if burst_count >= self.config.burst_limit {
            return Decision::Deny(DenyReason::Burst);
        }

        window.push_back(now);
        Decision::Allow
    }

    // == Tracked Clients ==
    /// Number of clients currently holding window state.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
