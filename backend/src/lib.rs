//! Users CRUD service with generated OpenAPI documentation.
//!
//! The crate is split into ports and adapters:
//!
//! - [`domain`]: the user model, errors, use-cases and ports.
//! - [`inbound::http`]: actix-web handlers, validation and error mapping.
//! - [`outbound::persistence`]: PostgreSQL and in-memory user stores.
//! - [`middleware`]: request tracing.
//! - [`doc`]: the OpenAPI document.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
