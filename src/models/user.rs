//! User domain type
//!
//! The record shape served by the lookup path and stored in the mock
//! directory.

use serde::{Deserialize, Serialize};

// == Plan ==
/// Subscription tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Enterprise,
}

// == User ==
/// One user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub is_active: bool,
}
