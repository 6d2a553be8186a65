//! User Lookup - a cached, rate-limited lookup service
//!
//! Serves user records through an LRU/TTL cache with request coalescing,
//! dual-window admission control and a batched upstream queue.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_lookup::api::create_router;
use user_lookup::{spawn_sweep_task, AppState, Config};

/// Main entry point for the lookup service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the service context (cache, limiter, queue, coalescer, metrics)
/// 4. Start the background expiry sweep task
/// 5. Create the Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM, then shut down gracefully
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_lookup=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting user lookup service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, ttl={}s, port={}, batch_size={}, batch_latency={}ms",
        config.cache_capacity,
        config.cache_ttl_secs,
        config.server_port,
        config.batch_size,
        config.batch_latency_ms
    );

    let state = AppState::from_config(&config);
    info!("Lookup service initialized");

    let sweep_handle = spawn_sweep_task(state.service.cache_handle(), config.sweep_interval_secs);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown, stops the sweep task before the server drains.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Expiry sweep task stopped");
}
