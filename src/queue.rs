//! Upstream Queue Module
//!
//! Serializes backend access behind an unbounded FIFO drained in fixed-size
//! batches. Each batch cycle waits a simulated backend latency, drains up
//! to `batch_size` items and resolves each one independently; at most one
//! cycle is ever active.
//!
//! The active-cycle flag and the FIFO live under one mutex, and the flag
//! only ever changes while that mutex is held: an enqueue either finds a
//! running cycle (and just appends) or flips the flag and spawns the cycle
//! itself, and the cycle only clears the flag after re-checking that the
//! FIFO is empty under the same lock. No interleaving can start a second
//! cycle or strand a queued item.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tracing::debug;

use crate::backend::{Backend, BackendError};
use crate::error::LookupError;
use crate::models::User;

// == Queue Item ==
/// One queued lookup and its completion handle.
struct QueueItem {
    key: String,
    done: oneshot::Sender<Result<Option<User>, BackendError>>,
}

// == Queue Interior ==
/// FIFO plus the cycle guard; always locked together.
struct Fifo {
    items: VecDeque<QueueItem>,
    cycle_active: bool,
}

/// State shared between handles and the cycle task.
struct Shared {
    fifo: Mutex<Fifo>,
    backend: Arc<dyn Backend>,
    batch_size: usize,
    latency: Duration,
}

// == Upstream Queue ==
/// Bounded-concurrency, batched channel to the backend.
///
/// Cheap to clone; all handles share one FIFO.
#[derive(Clone)]
pub struct UpstreamQueue {
    shared: Arc<Shared>,
}

impl UpstreamQueue {
    // == Constructor ==
    /// Creates a queue over the given backend.
    ///
    /// # Arguments
    /// * `backend` - The synchronous record store
    /// * `batch_size` - Items drained per cycle
    /// * `latency` - Simulated backend latency per cycle
    pub fn new(backend: Arc<dyn Backend>, batch_size: usize, latency: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                fifo: Mutex::new(Fifo {
                    items: VecDeque::new(),
                    cycle_active: false,
                }),
                backend,
                batch_size: batch_size.max(1),
                latency,
            }),
        }
    }

    // == Enqueue ==
    /// Appends a lookup and awaits its resolution.
    ///
    /// Resolves to `Ok(Some(user))` or `Ok(None)` for an absent key; errors
    /// only on a true backend failure. Every enqueued item eventually
    /// resolves; there is no cancellation or per-item timeout.
    pub async fn enqueue(&self, key: &str) -> Result<Option<User>, LookupError> {
        let (done, resolved) = oneshot::channel();

        {
            let mut fifo = self.shared.fifo.lock().await;
            fifo.items.push_back(QueueItem {
                key: key.to_string(),
                done,
            });

            if !fifo.cycle_active {
                fifo.cycle_active = true;
                let shared = Arc::clone(&self.shared);
                tokio::spawn(run_cycles(shared));
            }
        }

        match resolved.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(LookupError::Upstream(err.to_string())),
            // The cycle task never drops a completion before sending
            Err(_) => Err(LookupError::Internal(
                "upstream queue dropped a pending lookup".to_string(),
            )),
        }
    }

    // == Depth ==
    /// Number of items currently waiting (not yet drained into a batch).
    pub async fn depth(&self) -> usize {
        self.shared.fifo.lock().await.items.len()
    }
}

// == Batch Cycles ==
/// Runs batch cycles until the FIFO drains.
///
/// Exactly one instance of this task exists while `cycle_active` holds.
async fn run_cycles(shared: Arc<Shared>) {
    loop {
        tokio::time::sleep(shared.latency).await;

        let batch: Vec<QueueItem> = {
            let mut fifo = shared.fifo.lock().await;
            let take = shared.batch_size.min(fifo.items.len());
            fifo.items.drain(..take).collect()
        };

        debug!(batch_len = batch.len(), "resolving upstream batch");

        for item in batch {
            let result = shared.backend.fetch(&item.key);
            // A waiter that went away is not an error
            let _ = item.done.send(result);
        }

        let mut fifo = shared.fifo.lock().await;
        if fifo.items.is_empty() {
            fifo.cycle_active = false;
            return;
        }
        // Items arrived during this cycle; keep draining immediately
    }
}
