//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Use-case port for creating and updating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user and return the stored record.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Replace the supplied fields of a user.
    ///
    /// Returns `Ok(None)` when no user has the identifier.
    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<Option<User>, Error>;
}
