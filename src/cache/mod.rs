//! Cache Module
//!
//! Provides the in-memory read-through cache: fixed-TTL expiration, O(1)
//! LRU eviction and hit/miss accounting.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;
