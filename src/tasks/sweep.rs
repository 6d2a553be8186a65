//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries, so
//! cold keys that are never re-read still get released.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the periodic expiry sweep over a shared cache.
///
/// The task sleeps for the given interval between sweeps and takes the
/// cache write lock only for the sweep itself. The returned JoinHandle is
/// the task's stop switch: graceful shutdown (and tests) abort it
/// deterministically instead of leaving a fire-and-forget timer behind.
pub fn spawn_sweep_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "expiry sweep task started");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache = cache.write().await;
                cache.sweep_expired()
            };

            if removed > 0 {
                info!(removed, "expiry sweep evicted stale entries");
            } else {
                debug!("expiry sweep found nothing to evict");
            }
        }
    })
}
