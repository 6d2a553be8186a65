//! API Module
//!
//! HTTP handlers, middleware and routing for the lookup service REST API.
//!
//! # Endpoints
//! - `GET /users/{id}` - Rate-limited, cache-aware lookup
//! - `GET /users` / `POST /users` - Directory listing and writes
//! - `GET /users/cache-status` / `DELETE /users/cache` - Cache operations
//! - `GET /metrics` - Request metrics snapshot
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
