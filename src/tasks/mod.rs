//! Background Tasks Module
//!
//! Periodic work that runs alongside request handling.
//!
//! # Tasks
//! - Expiry sweep: evicts stale cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
