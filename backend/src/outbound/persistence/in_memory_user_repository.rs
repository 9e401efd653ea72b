//! Process-local `UserRepository` used when no database is configured.
//!
//! Behaves like the PostgreSQL adapter: UUID identifiers, insertion order and
//! a query failure for identifiers that are not UUIDs. Data is lost on
//! restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserChanges, UserId};

/// In-memory implementation of the [`UserRepository`] port.
///
/// # Examples
/// ```
/// use backrub::domain::ports::UserRepository;
/// use backrub::domain::{NewUser, PersonName};
/// use backrub::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = InMemoryUserRepository::new();
/// let draft = NewUser::new(
///     PersonName::new("Ada").expect("name"),
///     PersonName::new("Lovelace").expect("name"),
/// );
/// let user = repository.create(&draft).await.expect("stored");
/// assert_eq!(repository.list().await.expect("listed"), vec![user]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Normalise the identifier to the form stored records carry.
fn canonical_id(id: &UserId) -> Result<UserId, UserPersistenceError> {
    Uuid::parse_str(id.as_ref())
        .map(UserId::from_uuid)
        .map_err(|_| UserPersistenceError::query(format!("malformed user identifier: {id}")))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let stored = user.clone().into_user(UserId::from_uuid(Uuid::new_v4()));
        self.users.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let id = canonical_id(id)?;
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id() == &id).cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let id = canonical_id(id)?;
        let mut users = self.users.write().await;
        let Some(slot) = users.iter_mut().find(|user| user.id() == &id) else {
            return Ok(None);
        };
        *slot = changes.apply_to(slot);
        Ok(Some(slot.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonName;
    use rstest::{fixture, rstest};

    fn name(value: &str) -> PersonName {
        PersonName::new(value).expect("valid name")
    }

    #[fixture]
    fn repository() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    async fn create(repository: &InMemoryUserRepository, first: &str, last: &str) -> User {
        repository
            .create(&NewUser::new(name(first), name(last)))
            .await
            .expect("create succeeds")
    }

    #[rstest]
    #[tokio::test]
    async fn create_assigns_distinct_uuids(repository: InMemoryUserRepository) {
        let ada = create(&repository, "Ada", "Lovelace").await;
        let grace = create(&repository, "Grace", "Hopper").await;

        assert_ne!(ada.id(), grace.id());
        Uuid::parse_str(ada.id().as_ref()).expect("UUID id");
    }

    #[rstest]
    #[tokio::test]
    async fn list_preserves_insertion_order(repository: InMemoryUserRepository) {
        let ada = create(&repository, "Ada", "Lovelace").await;
        let grace = create(&repository, "Grace", "Hopper").await;

        assert_eq!(repository.list().await.expect("list"), vec![ada, grace]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_accepts_uppercase_uuid(repository: InMemoryUserRepository) {
        let ada = create(&repository, "Ada", "Lovelace").await;
        let upper = UserId::new(ada.id().as_ref().to_uppercase()).expect("id");

        assert_eq!(repository.find_by_id(&upper).await.expect("find"), Some(ada));
    }

    #[rstest]
    #[tokio::test]
    async fn find_missing_returns_none(repository: InMemoryUserRepository) {
        let id = UserId::from_uuid(Uuid::new_v4());
        assert_eq!(repository.find_by_id(&id).await.expect("find"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_id_is_a_query_error(repository: InMemoryUserRepository) {
        let id = UserId::new("42").expect("id");
        let err = repository.find_by_id(&id).await.expect_err("malformed");
        assert_eq!(err, UserPersistenceError::query("malformed user identifier: 42"));

        let err = repository
            .update(&id, &UserChanges::default())
            .await
            .expect_err("malformed");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_changes_in_place(repository: InMemoryUserRepository) {
        let ada = create(&repository, "Ada", "Lovelace").await;
        let changes = UserChanges::default().with_lastname(name("King"));

        let updated = repository
            .update(ada.id(), &changes)
            .await
            .expect("update")
            .expect("record exists");
        assert_eq!(updated.firstname().as_ref(), "Ada");
        assert_eq!(updated.lastname().as_ref(), "King");
        assert_eq!(repository.list().await.expect("list"), vec![updated]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_returns_none(repository: InMemoryUserRepository) {
        let id = UserId::from_uuid(Uuid::new_v4());
        let changes = UserChanges::default().with_firstname(name("Ada"));
        assert_eq!(repository.update(&id, &changes).await.expect("update"), None);
        assert!(repository.list().await.expect("list").is_empty());
    }
}
