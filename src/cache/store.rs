//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with O(1) LRU tracking and a
//! single fixed TTL. Reads never return a value past its deadline; writes
//! never push the store past its capacity.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, RecencyList};

// == Cache Store ==
/// Capacity- and time-bounded key/value cache with LRU eviction.
///
/// Generic over the cached value so the same engine backs the user lookup
/// path and unit tests with plain strings. All methods are synchronous and
/// non-blocking; callers provide exclusion (the service wraps the store in
/// an `Arc<RwLock<_>>`).
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU recency tracker
    recency: RecencyList,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of resident entries
    capacity: usize,
    /// Fixed TTL applied to every insert
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries
    /// * `ttl` - Fixed time-to-live applied to every inserted value
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Misses on absent keys and on expired entries; an expired entry is
    /// evicted on the spot. A hit moves the key to the most-recently-touched
    /// end and bumps the hit counter.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.recency.remove(key);
                self.stats.set_size(self.entries.len());
                self.stats.record_miss();
                return None;
            }

            let value = entry.value.clone();
            self.recency.touch(key);
            self.stats.record_hit();
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Insert ==
    /// Stores a value under a key with the configured TTL.
    ///
    /// An existing key is removed first so its recency resets. When the
    /// store is at capacity, the least-recently-touched key is evicted
    /// before the insert; the check and the eviction happen in the same
    /// call, so the capacity invariant holds for any interleaving the
    /// surrounding lock admits.
    pub fn insert(&mut self, key: String, value: V) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.remove(&key).is_some() {
            self.recency.remove(&key);
        } else if self.entries.len() >= self.capacity {
            if let Some(victim) = self.recency.evict_oldest() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, self.ttl));
        self.recency.touch(&key);
        self.stats.set_size(self.entries.len());
    }

    // == Clear ==
    /// Empties the cache and zeroes all counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats = CacheStats::new();
    }

    // == Stats ==
    /// Point-in-time snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Sweep Expired ==
    /// Removes every expired entry, returning how many were dropped.
    ///
    /// Driven by the background sweep task so cold keys that are never
    /// re-read still get released.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.recency.remove(key);
        }

        self.stats.set_size(self.entries.len());
        expired.len()
    }

    // == Length ==
    /// Current number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
