//! Builder for the HTTP state from the configured store.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use backrub::domain::ports::UserRepository;
use backrub::inbound::http::state::HttpState;
use backrub::outbound::persistence::{DieselUserRepository, InMemoryUserRepository};

use super::ServerConfig;

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            info!("no database configured; users are kept in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repository(build_user_repository(config)))
}
