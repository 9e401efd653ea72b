//! OpenAPI schema definitions for domain types and request bodies.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No route or resource matches the request.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store failed or another unexpected error occurred.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: firstname")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "6f1c2a57-7c3e-4f7e-9d55-0f6a4b1e2d3c")]
    trace_id: Option<String>,
    /// Violation details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// First name.
    #[schema(example = "Ada", min_length = 1, max_length = 100)]
    firstname: String,
    /// Last name.
    #[schema(example = "Lovelace", min_length = 1, max_length = 100)]
    lastname: String,
}

/// Request body for `POST /user`. Unknown fields are rejected.
#[derive(ToSchema)]
#[schema(as = CreateUserRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateUserRequestSchema {
    /// First name.
    #[schema(example = "Ada", min_length = 1, max_length = 100)]
    firstname: String,
    /// Last name.
    #[schema(example = "Lovelace", min_length = 1, max_length = 100)]
    lastname: String,
}

/// Request body for `PUT /user/{id}`. Absent fields keep their stored value.
#[derive(ToSchema)]
#[schema(as = UpdateUserRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateUserRequestSchema {
    /// Replacement first name.
    #[schema(example = "Augusta", min_length = 1, max_length = 100)]
    firstname: Option<String>,
    /// Replacement last name.
    #[schema(example = "King", min_length = 1, max_length = 100)]
    lastname: Option<String>,
}
