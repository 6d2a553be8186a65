//! Models Module
//!
//! Domain types and request/response DTOs for the lookup service API.

mod requests;
mod responses;
mod user;

pub use requests::CreateUserRequest;
pub use responses::{CacheStatusResponse, ErrorResponse, HealthResponse};
pub use user::{Plan, User};
