//! Backend Module
//!
//! The seam between the lookup core and the record store. The core only
//! sees a synchronous `fetch`; everything behind it is replaceable. The
//! shipped implementation is an in-memory directory seeded with mock users.

use std::sync::RwLock;

use thiserror::Error;

use crate::models::{Plan, User};

// == Backend Error ==
/// A true backend failure (distinct from "record absent").
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

// == Backend Trait ==
/// Opaque synchronous record store.
///
/// `fetch` returns `Ok(None)` for an absent key and `Err` only when the
/// store itself failed.
pub trait Backend: Send + Sync + 'static {
    fn fetch(&self, key: &str) -> Result<Option<User>, BackendError>;
}

// == Mock Directory ==
/// In-memory user directory standing in for a real database.
#[derive(Debug, Default)]
pub struct MockDirectory {
    users: RwLock<Vec<User>>,
}

impl MockDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with the stock demo users.
    pub fn with_seed_data() -> Self {
        let seed = |id: &str, name: &str, email: &str, plan: Plan, is_active: bool| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            plan,
            is_active,
        };

        Self {
            users: RwLock::new(vec![
                seed("1", "Alice Johnson", "alice@example.com", Plan::Pro, true),
                seed("2", "Bob Smith", "bob@example.com", Plan::Free, true),
                seed("3", "Charlie Brown", "charlie@example.com", Plan::Enterprise, false),
                seed("4", "Diana Prince", "diana@example.com", Plan::Pro, true),
                seed("5", "Evan Wright", "evan@example.com", Plan::Free, true),
            ]),
        }
    }

    /// Lists every user in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.users.read().expect("directory lock poisoned").clone()
    }

    /// Inserts a new user, assigning the next sequential id.
    pub fn insert(&self, name: String, email: String, plan: Plan) -> User {
        let mut users = self.users.write().expect("directory lock poisoned");
        let user = User {
            id: (users.len() + 1).to_string(),
            name,
            email,
            plan,
            is_active: true,
        };
        users.push(user.clone());
        user
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.read().expect("directory lock poisoned").len()
    }

    /// True when the directory holds no users.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MockDirectory {
    fn fetch(&self, key: &str) -> Result<Option<User>, BackendError> {
        let users = self
            .users
            .read()
            .map_err(|_| BackendError("directory lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == key).cloned())
    }
}
