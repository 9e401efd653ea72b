//! Persistence adapters implementing the user repository port.
//!
//! - [`DieselUserRepository`]: PostgreSQL through `diesel-async` over a bb8
//!   pool ([`DbPool`]).
//! - [`InMemoryUserRepository`]: process-local store used when no database is
//!   configured.
//!
//! [`run_migrations`] applies the embedded schema at startup.

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
