//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod docs;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

/// Register every route of the service.
///
/// Callers supply [`state::HttpState`], [`health::HealthState`] and
/// [`error::json_config`] as app data, and set
/// [`error::route_not_found`] as the default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(health::ready)
        .service(health::live)
        .service(docs::docs_redirect)
        .service(docs::swagger_ui());
}
