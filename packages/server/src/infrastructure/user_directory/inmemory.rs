//! Seedable in-memory user directory.
//!
//! Stands in for the external user service: the server binary seeds it with
//! the identifiers it should treat as registered users.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, UserDirectory, UserId};

/// In-memory set of registered user identifiers.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashSet<String>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashSet::new()),
        }
    }

    /// Mark an identifier as a registered user.
    pub async fn register(&self, user_id: UserId) {
        let mut users = self.users.lock().await;
        users.insert(user_id.into_string());
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users.contains(user_id.as_str()))
    }
}
