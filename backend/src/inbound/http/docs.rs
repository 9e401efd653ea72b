//! Interactive API documentation.
//!
//! `GET /` redirects to Swagger UI under `/docs/`, which loads the document
//! served at [`OPENAPI_JSON_PATH`].

use actix_web::{HttpResponse, get, http::header};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;

/// Path serving the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path prefix of the Swagger UI assets.
pub const DOCS_PATH: &str = "/docs/";

/// Redirect the site root to the documentation UI.
#[get("/")]
pub async fn docs_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, DOCS_PATH))
        .finish()
}

/// Swagger UI service bound to the generated [`ApiDoc`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
