//! Error types for the lookup service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::limiter::DenyReason;

// == Lookup Error Enum ==
/// Unified error type for the lookup service.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Key absent from the backend store
    #[error("No record found for key: {0}")]
    NotFound(String),

    /// Request denied by the admission controller
    #[error("Too many requests: {0} limit reached")]
    RateLimited(DenyReason),

    /// The backend raised an error
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected internal condition
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match &self {
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
            LookupError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Rate-limit denials also carry the window kind so clients can
        // distinguish a burst from a sustained overrun.
        let body = match &self {
            LookupError::RateLimited(reason) => Json(json!({
                "error": self.to_string(),
                "reason": reason.as_str(),
            })),
            _ => Json(json!({
                "error": self.to_string()
            })),
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup service.
pub type Result<T> = std::result::Result<T, LookupError>;
