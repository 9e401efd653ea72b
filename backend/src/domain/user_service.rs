//! User use-cases backed by a [`UserRepository`].
//!
//! The service is the only place where persistence failures become domain
//! errors. Every failure is logged with its cause and surfaced to clients as
//! an internal error, whatever the underlying store reported.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Implements [`UsersCommand`] and [`UsersQuery`] over a repository.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(operation: &'static str) -> impl FnOnce(UserPersistenceError) -> Error {
    move |err| {
        error!(error = %err, operation, "user persistence failed");
        Error::internal(format!("{operation} failed: {err}"))
    }
}

#[async_trait]
impl UsersCommand for UserService {
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repository
            .create(&user)
            .await
            .map_err(map_persistence_error("create user"))?;
        debug!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<Option<User>, Error> {
        let updated = self
            .repository
            .update(id, &changes)
            .await
            .map_err(map_persistence_error("update user"))?;
        if updated.is_none() {
            debug!(user_id = %id, "update matched no user");
        }
        Ok(updated)
    }
}

#[async_trait]
impl UsersQuery for UserService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(map_persistence_error("list users"))
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("find user"))
    }
}
