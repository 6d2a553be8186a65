//! Coalescer Module
//!
//! Collapses concurrent lookups for the same key into a single backend
//! fetch. The first caller for a key (the leader) registers a pending
//! lookup and drives the fetch; every concurrent duplicate (a waiter)
//! subscribes to the leader's result cell and observes the identical
//! outcome, be it a value, a not-found or a failure.
//!
//! The pending table holds one `broadcast::Sender` per in-flight key.
//! Leader election (check-then-insert) and retirement (remove-then-publish)
//! each happen under a single acquisition of the table lock, so at most one
//! pending lookup can exist per key and no waiter can subscribe to a cell
//! that will never publish.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::debug;

use crate::cache::CacheStore;
use crate::error::{LookupError, Result};
use crate::models::User;
use crate::queue::UpstreamQueue;

// == Lookup Outcome ==
/// The shared result every caller of one in-flight fetch observes.
#[derive(Debug, Clone)]
enum LookupOutcome {
    Found(User),
    Missing,
    Failed(String),
}

enum Role {
    Leader(broadcast::Sender<LookupOutcome>),
    Waiter(broadcast::Receiver<LookupOutcome>),
}

// == Coalescer ==
/// Cache-aware, deduplicating read path over the upstream queue.
///
/// Cheap to clone; all state is shared.
#[derive(Clone)]
pub struct Coalescer {
    cache: Arc<RwLock<CacheStore<User>>>,
    queue: UpstreamQueue,
    pending: Arc<Mutex<HashMap<String, broadcast::Sender<LookupOutcome>>>>,
}

impl Coalescer {
    // == Constructor ==
    /// Creates a coalescer over a shared cache and upstream queue.
    pub fn new(cache: Arc<RwLock<CacheStore<User>>>, queue: UpstreamQueue) -> Self {
        Self {
            cache,
            queue,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // == Lookup ==
    /// Resolves a key through cache, pending table, then upstream queue.
    ///
    /// Guarantees at most one backend fetch per key in flight. On success
    /// the cache is populated before any caller returns; on failure nothing
    /// is cached and the next request for the key starts fresh.
    pub async fn lookup(&self, key: &str) -> Result<User> {
        // 1. Cache hit returns immediately
        if let Some(user) = self.cache.write().await.get(key) {
            return Ok(user);
        }

        // 2/3. Attach to an in-flight fetch, or become the leader.
        // Check-then-insert happens under one lock acquisition.
        let role = {
            let mut pending = self.pending.lock().await;
            match pending.get(key) {
                Some(cell) => Role::Waiter(cell.subscribe()),
                None => {
                    let (cell, _) = broadcast::channel(1);
                    pending.insert(key.to_string(), cell.clone());
                    Role::Leader(cell)
                }
            }
        };

        match role {
            Role::Waiter(mut subscription) => {
                debug!(key, "coalesced onto in-flight lookup");
                match subscription.recv().await {
                    Ok(outcome) => Self::into_result(key, outcome),
                    Err(_) => Err(LookupError::Internal(
                        "pending lookup closed without an outcome".to_string(),
                    )),
                }
            }
            Role::Leader(cell) => {
                // Resolve on a detached task: a caller that disconnects
                // must not cancel work its waiters share.
                let this = self.clone();
                let owned_key = key.to_string();
                let resolution =
                    tokio::spawn(async move { this.resolve_as_leader(owned_key, cell).await });

                match resolution.await {
                    Ok(outcome) => Self::into_result(key, outcome),
                    Err(_) => Err(LookupError::Internal(
                        "lookup resolution task failed".to_string(),
                    )),
                }
            }
        }
    }

    /// Number of keys with a fetch currently in flight.
    pub async fn pending_lookups(&self) -> usize {
        self.pending.lock().await.len()
    }

    // == Leader Path ==
    /// Drives one backend fetch and publishes its outcome.
    ///
    /// Cache population precedes retirement, and retirement precedes
    /// publication inside one lock acquisition: a caller that finds the
    /// table entry gone either sees the cached value or legitimately
    /// starts a fresh fetch.
    async fn resolve_as_leader(
        &self,
        key: String,
        cell: broadcast::Sender<LookupOutcome>,
    ) -> LookupOutcome {
        let outcome = match self.queue.enqueue(&key).await {
            Ok(Some(user)) => {
                self.cache.write().await.insert(key.clone(), user.clone());
                LookupOutcome::Found(user)
            }
            Ok(None) => LookupOutcome::Missing,
            Err(err) => LookupOutcome::Failed(err.to_string()),
        };

        {
            let mut pending = self.pending.lock().await;
            pending.remove(&key);
            // Waiters subscribed while the entry existed; no receivers
            // just means nobody coalesced onto this fetch.
            let _ = cell.send(outcome.clone());
        }

        outcome
    }

    fn into_result(key: &str, outcome: LookupOutcome) -> Result<User> {
        match outcome {
            LookupOutcome::Found(user) => Ok(user),
            LookupOutcome::Missing => Err(LookupError::NotFound(key.to_string())),
            LookupOutcome::Failed(message) => Err(LookupError::Upstream(message)),
        }
    }
}
