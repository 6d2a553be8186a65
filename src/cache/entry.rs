//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL expiration.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value together with its expiration deadline.
///
/// Every entry carries a deadline; the store never hands out a value whose
/// deadline has passed.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic deadline after which the entry is stale
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current instant is
    /// greater than or equal to its deadline, so a TTL that has fully
    /// elapsed can never be read back.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Remaining TTL ==
    /// Remaining time before expiry, zero if already expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
