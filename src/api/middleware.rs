//! API Middleware
//!
//! Admission control on the user routes and request metrics recording on
//! the whole router.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::LookupError;
use crate::limiter::Decision;

use super::handlers::AppState;

/// Header identifying the calling client for admission control.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Rate-limit gate for the user routes.
///
/// Runs before any cache or coalescing work and short-circuits with a 429
/// carrying the window kind. Clients without an id header share one bucket.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client_id = request
        .headers()
        .get(CLIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("anonymous")
        .to_string();

    match state.service.admit(&client_id).await {
        Decision::Allow => next.run(request).await,
        Decision::Deny(reason) => {
            warn!(client_id, reason = reason.as_str(), "request rate limited");
            LookupError::RateLimited(reason).into_response()
        }
    }
}

/// Records every response's status class and duration.
///
/// Outermost layer, so rate-limit denials and errors are observed exactly
/// like successes.
pub async fn track_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let response = next.run(request).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    state
        .service
        .record_request(response.status().as_u16(), duration_ms)
        .await;

    response
}
