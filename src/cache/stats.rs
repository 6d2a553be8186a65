//! Cache Statistics Module
//!
//! Tracks cache performance counters: hits, misses, evictions and resident
//! entry count.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time cache performance snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache reads
    pub hits: u64,
    /// Number of failed cache reads (absent or expired)
    pub misses: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of resident entries
    pub size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hits over total reads, 0.0 when nothing has been read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Updates the resident entry count.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}
