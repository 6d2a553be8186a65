//! API Routes
//!
//! Configures the Axum router with all lookup service endpoints.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_status_handler, clear_cache_handler, create_user_handler, health_handler,
    list_users_handler, lookup_user_handler, metrics_handler, AppState,
};
use super::middleware::{enforce_rate_limit, track_metrics};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /users/{id}` - Rate-limited, cache-aware lookup
/// - `GET /users` - List the directory
/// - `POST /users` - Create a user (refreshes the cache)
/// - `GET /users/cache-status` - Cache counters + average response time
/// - `DELETE /users/cache` - Clear the cache and reset metrics
/// - `GET /metrics` - Request metrics snapshot
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Admission control on the `/users` subtree
/// - Metrics recording and request tracing over the whole router
/// - CORS: allows any origin (configurable for production)
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static routes must sit next to the `:id` capture; axum prefers the
    // static match, so /users/cache-status never reaches the lookup path.
    let users = Router::new()
        .route("/", get(list_users_handler).post(create_user_handler))
        .route("/cache-status", get(cache_status_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/:id", get(lookup_user_handler))
        .layer(from_fn_with_state(state.clone(), enforce_rate_limit));

    Router::new()
        .nest("/users", users)
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(from_fn_with_state(state.clone(), track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
