//! Request DTOs for the lookup service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::Plan;

/// Request body for creating a user (POST /users)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Display name, required
    pub name: String,
    /// Contact email, required
    pub email: String,
    /// Subscription tier, defaults to free
    #[serde(default)]
    pub plan: Plan,
}

impl CreateUserRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Some("Email is required".to_string());
        }
        None
    }
}
