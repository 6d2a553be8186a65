//! Lookup Service Module
//!
//! The explicit context object composing the cache, rate limiter,
//! coalescer, upstream queue and metrics aggregator. Constructed once at
//! startup and injected into request handling; nothing in the crate holds
//! ambient global state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::backend::Backend;
use crate::cache::{CacheStats, CacheStore};
use crate::coalesce::Coalescer;
use crate::config::Config;
use crate::error::Result;
use crate::limiter::{Decision, LimiterConfig, RateLimiter};
use crate::metrics::{MetricsAggregator, MetricsSnapshot};
use crate::models::User;
use crate::queue::UpstreamQueue;

// == Lookup Service ==
/// Front door for the lookup core.
///
/// Each shared structure carries its own exclusion so every
/// check-then-act sequence inside it runs atomically: the cache behind an
/// RwLock, the limiter and metrics behind Mutexes, and the pending table
/// and queue FIFO behind their own locks inside Coalescer and
/// UpstreamQueue.
pub struct LookupService {
    cache: Arc<RwLock<CacheStore<User>>>,
    limiter: Mutex<RateLimiter>,
    coalescer: Coalescer,
    metrics: Mutex<MetricsAggregator>,
}

impl LookupService {
    // == Constructor ==
    /// Builds the service from configuration over the given backend.
    pub fn new(config: &Config, backend: Arc<dyn Backend>) -> Self {
        let cache = Arc::new(RwLock::new(CacheStore::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_secs),
        )));

        let queue = UpstreamQueue::new(
            backend,
            config.batch_size,
            Duration::from_millis(config.batch_latency_ms),
        );

        let limiter = RateLimiter::new(LimiterConfig {
            long_window: Duration::from_secs(config.long_window_secs),
            long_limit: config.long_window_limit,
            burst_window: Duration::from_secs(config.burst_window_secs),
            burst_limit: config.burst_limit,
        });

        Self {
            cache: Arc::clone(&cache),
            limiter: Mutex::new(limiter),
            coalescer: Coalescer::new(cache, queue),
            metrics: Mutex::new(MetricsAggregator::new()),
        }
    }

    // == Admission ==
    /// Admission decision for a client; called before `lookup`.
    pub async fn admit(&self, client_id: &str) -> Decision {
        self.limiter.lock().await.admit(client_id)
    }

    // == Lookup ==
    /// The cache-aware, coalescing read path.
    pub async fn lookup(&self, key: &str) -> Result<User> {
        self.coalescer.lookup(key).await
    }

    // == Mutation Hook ==
    /// Keeps the cache coherent after a write elsewhere in the system.
    pub async fn notify_mutation(&self, key: &str, value: User) {
        info!(key, "cache refreshed after external mutation");
        self.cache.write().await.insert(key.to_string(), value);
    }

    // == Invalidation ==
    /// Wipes the cache and resets the metrics counters.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        self.metrics.lock().await.reset();
        info!("cache cleared and metrics reset");
    }

    // == Observability ==
    /// Point-in-time cache counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Point-in-time request metrics.
    pub async fn metrics_stats(&self) -> MetricsSnapshot {
        self.metrics.lock().await.snapshot()
    }

    /// Records one completed request, whatever path produced it.
    pub async fn record_request(&self, status: u16, duration_ms: u64) {
        self.metrics.lock().await.record(status, duration_ms);
    }

    // == Shared Handles ==
    /// Cache handle for the background sweep task.
    pub fn cache_handle(&self) -> Arc<RwLock<CacheStore<User>>> {
        Arc::clone(&self.cache)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::backend::{BackendError, MockDirectory};
    use crate::error::LookupError;
    use crate::limiter::DenyReason;
    use crate::models::Plan;

    fn test_config() -> Config {
        Config {
            batch_latency_ms: 10,
            ..Config::default()
        }
    }

    fn service() -> LookupService {
        LookupService::new(&test_config(), Arc::new(MockDirectory::with_seed_data()))
    }

    #[tokio::test]
    async fn test_lookup_found_and_cached() {
        let svc = service();

        let user = svc.lookup("1").await.unwrap();
        assert_eq!(user.name, "Alice Johnson");

        let stats = svc.cache_stats().await;
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let svc = service();
        assert!(matches!(
            svc.lookup("999").await.unwrap_err(),
            LookupError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_admit_burst_denial() {
        let svc = service();

        for _ in 0..5 {
            assert_eq!(svc.admit("c").await, Decision::Allow);
        }
        assert_eq!(svc.admit("c").await, Decision::Deny(DenyReason::Burst));
    }

    #[tokio::test]
    async fn test_notify_mutation_serves_without_backend() {
        struct NoBackend(AtomicUsize);
        impl crate::backend::Backend for NoBackend {
            fn fetch(&self, _key: &str) -> std::result::Result<Option<User>, BackendError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        }

        let backend = Arc::new(NoBackend(AtomicUsize::new(0)));
        let svc = LookupService::new(&test_config(), backend.clone());

        let user = User {
            id: "10".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            plan: Plan::Enterprise,
            is_active: true,
        };
        svc.notify_mutation("10", user.clone()).await;

        assert_eq!(svc.lookup("10").await.unwrap(), user);
        assert_eq!(backend.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_cache_resets_everything() {
        let svc = service();

        svc.lookup("1").await.unwrap();
        svc.record_request(200, 15).await;

        svc.clear_cache().await;

        let cache = svc.cache_stats().await;
        assert_eq!(cache.hits, 0);
        assert_eq!(cache.misses, 0);
        assert_eq!(cache.size, 0);

        let metrics = svc.metrics_stats().await;
        assert_eq!(metrics.total_requests, 0);
    }

    #[tokio::test]
    async fn test_metrics_record_every_outcome() {
        let svc = service();

        svc.record_request(200, 10).await;
        svc.record_request(404, 5).await;
        svc.record_request(429, 0).await;

        let snapshot = svc.metrics_stats().await;
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.status_distribution.success, 1);
        assert_eq!(snapshot.status_distribution.client_error, 2);
    }
}
