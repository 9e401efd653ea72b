//! Integration tests for `DieselUserRepository` against a live PostgreSQL.
//!
//! Set `BACKRUB_TEST_DATABASE_URL` to a disposable database to run them; the
//! suite is skipped otherwise. Migrations are applied and the `users` table
//! is emptied before each test, so tests share one lock.

use backrub::domain::ports::{UserPersistenceError, UserRepository};
use backrub::domain::{NewUser, PersonName, UserChanges, UserId};
use backrub::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
use diesel::{Connection, PgConnection, RunQueryDsl};
use rstest::rstest;
use tokio::sync::{Mutex, MutexGuard};

const DATABASE_URL_VAR: &str = "BACKRUB_TEST_DATABASE_URL";

static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

struct TestContext {
    repository: DieselUserRepository,
    _guard: MutexGuard<'static, ()>,
}

fn name(value: &str) -> PersonName {
    PersonName::new(value).expect("valid name")
}

fn draft(first: &str, last: &str) -> NewUser {
    NewUser::new(name(first), name(last))
}

fn truncate_users(url: &str) {
    let mut conn = PgConnection::establish(url).expect("connect for cleanup");
    diesel::sql_query("TRUNCATE users")
        .execute(&mut conn)
        .expect("truncate users");
}

async fn setup() -> Option<TestContext> {
    let url = std::env::var(DATABASE_URL_VAR).ok()?;
    let guard = DATABASE_LOCK.lock().await;

    run_migrations(&url).await.expect("migrations apply");
    let cleanup_url = url.clone();
    tokio::task::spawn_blocking(move || truncate_users(&cleanup_url))
        .await
        .expect("cleanup task");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");

    Some(TestContext {
        repository: DieselUserRepository::new(pool),
        _guard: guard,
    })
}

#[rstest]
#[tokio::test]
async fn create_then_find_round_trips_names() {
    let Some(ctx) = setup().await else { return };

    let created = ctx
        .repository
        .create(&draft("Ada", "Lovelace"))
        .await
        .expect("create");
    let found = ctx
        .repository
        .find_by_id(created.id())
        .await
        .expect("find");

    assert_eq!(found, Some(created));
}

#[rstest]
#[tokio::test]
async fn list_returns_rows_in_insertion_order() {
    let Some(ctx) = setup().await else { return };

    let ada = ctx.repository.create(&draft("Ada", "Lovelace")).await.expect("create");
    let grace = ctx.repository.create(&draft("Grace", "Hopper")).await.expect("create");

    assert_eq!(ctx.repository.list().await.expect("list"), vec![ada, grace]);
}

#[rstest]
#[tokio::test]
async fn update_changes_only_supplied_columns() {
    let Some(ctx) = setup().await else { return };
    let ada = ctx.repository.create(&draft("Ada", "Lovelace")).await.expect("create");

    let updated = ctx
        .repository
        .update(ada.id(), &UserChanges::default().with_lastname(name("King")))
        .await
        .expect("update")
        .expect("row exists");
    assert_eq!(updated.firstname().as_ref(), "Ada");
    assert_eq!(updated.lastname().as_ref(), "King");

    let unchanged = ctx
        .repository
        .update(ada.id(), &UserChanges::default())
        .await
        .expect("empty update");
    assert_eq!(unchanged, Some(updated));
}

#[rstest]
#[tokio::test]
async fn missing_rows_return_none() {
    let Some(ctx) = setup().await else { return };
    let id = UserId::new("00000000-0000-4000-8000-000000000000").expect("id");

    assert_eq!(ctx.repository.find_by_id(&id).await.expect("find"), None);
    let changes = UserChanges::default().with_firstname(name("Ada"));
    assert_eq!(ctx.repository.update(&id, &changes).await.expect("update"), None);
}

#[rstest]
#[tokio::test]
async fn malformed_ids_are_query_errors() {
    let Some(ctx) = setup().await else { return };
    let id = UserId::new("not-a-uuid").expect("id");

    let err = ctx.repository.find_by_id(&id).await.expect_err("malformed");
    assert!(matches!(err, UserPersistenceError::Query { .. }));
}
