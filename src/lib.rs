//! User Lookup - a cached, rate-limited lookup service
//!
//! Fronts a slow, batched backend store with an LRU/TTL cache, per-client
//! dual-window admission control, request coalescing and process-wide
//! request metrics.

pub mod api;
pub mod backend;
pub mod cache;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod limiter;
pub mod metrics;
pub mod models;
pub mod queue;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::LookupService;
pub use tasks::spawn_sweep_task;
