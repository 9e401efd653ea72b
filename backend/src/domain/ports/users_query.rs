//! Driving port for user reads.
//!
//! Inbound adapters use this port to fetch records without importing
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with the identifier, or `Ok(None)` when absent.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
