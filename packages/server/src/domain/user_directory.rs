//! Boundary to the external user service.
//!
//! The engine trusts identifiers handed to it by the authentication layer
//! and only asks the directory whether an identifier names a registered
//! user. User creation and profile data live outside this crate.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{repository::RepositoryError, value_object::UserId};

/// Lookup of registered users.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether the identifier resolves to a registered user.
    async fn exists(&self, user_id: &UserId) -> Result<bool, RepositoryError>;
}
