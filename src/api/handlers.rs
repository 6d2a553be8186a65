//! API Handlers
//!
//! HTTP request handlers for each lookup service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::backend::{Backend, MockDirectory};
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::metrics::MetricsSnapshot;
use crate::models::{CacheStatusResponse, CreateUserRequest, HealthResponse, User};
use crate::service::LookupService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The composed lookup core
    pub service: Arc<LookupService>,
    /// The mock record store; also the write path's target
    pub directory: Arc<MockDirectory>,
}

impl AppState {
    /// Creates state from an already-built service and directory.
    pub fn new(service: LookupService, directory: Arc<MockDirectory>) -> Self {
        Self {
            service: Arc::new(service),
            directory,
        }
    }

    /// Creates state from configuration with a seeded mock directory.
    pub fn from_config(config: &Config) -> Self {
        let directory = Arc::new(MockDirectory::with_seed_data());
        let backend: Arc<dyn Backend> = directory.clone();
        let service = LookupService::new(config, backend);
        Self::new(service, directory)
    }
}

/// Handler for GET /users/{id}
///
/// The cache-aware, coalescing read path. Admission control already ran in
/// the route middleware by the time this executes.
pub async fn lookup_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let user = state.service.lookup(&id).await?;
    Ok(Json(user))
}

/// Handler for GET /users
///
/// Lists the directory without touching the cache.
pub async fn list_users_handler(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.directory.list())
}

/// Handler for POST /users
///
/// Inserts into the directory, then refreshes the cache through the
/// mutation hook so the new record is readable before its first miss.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if let Some(message) = req.validate() {
        return Err(LookupError::InvalidRequest(message));
    }

    let user = state.directory.insert(req.name, req.email, req.plan);
    state.service.notify_mutation(&user.id, user.clone()).await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for GET /users/cache-status
pub async fn cache_status_handler(State(state): State<AppState>) -> Json<CacheStatusResponse> {
    let stats = state.service.cache_stats().await;
    let metrics = state.service.metrics_stats().await;

    Json(CacheStatusResponse::new(
        &stats,
        metrics.average_response_time_ms,
    ))
}

/// Handler for DELETE /users/cache
///
/// Wipes the cache and resets the metrics counters.
pub async fn clear_cache_handler(State(state): State<AppState>) -> StatusCode {
    state.service.clear_cache().await;
    StatusCode::NO_CONTENT
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.service.metrics_stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plan;

    fn test_state() -> AppState {
        AppState::from_config(&Config {
            batch_latency_ms: 10,
            ..Config::default()
        })
    }

    #[tokio::test]
    async fn test_lookup_handler_found() {
        let state = test_state();

        let result = lookup_user_handler(State(state), Path("1".to_string())).await;
        assert_eq!(result.unwrap().0.name, "Alice Johnson");
    }

    #[tokio::test]
    async fn test_lookup_handler_not_found() {
        let state = test_state();

        let result = lookup_user_handler(State(state), Path("999".to_string())).await;
        assert!(matches!(result.unwrap_err(), LookupError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_user_handler() {
        let state = test_state();

        let req = CreateUserRequest {
            name: "Frank".to_string(),
            email: "frank@example.com".to_string(),
            plan: Plan::Pro,
        };
        let (status, Json(user)) =
            create_user_handler(State(state.clone()), Json(req)).await.unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.id, "6");

        // The mutation hook makes the record immediately cache-resident
        let found = lookup_user_handler(State(state), Path("6".to_string())).await;
        assert_eq!(found.unwrap().0.name, "Frank");
    }

    #[tokio::test]
    async fn test_create_user_invalid() {
        let state = test_state();

        let req = CreateUserRequest {
            name: "".to_string(),
            email: "x@example.com".to_string(),
            plan: Plan::Free,
        };
        let result = create_user_handler(State(state), Json(req)).await;
        assert!(matches!(result.unwrap_err(), LookupError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_cache_status_handler() {
        let state = test_state();

        let response = cache_status_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.size, 0);
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = test_state();

        lookup_user_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        assert_eq!(clear_cache_handler(State(state.clone())).await, StatusCode::NO_CONTENT);

        let status = cache_status_handler(State(state)).await;
        assert_eq!(status.size, 0);
        assert_eq!(status.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
