//! Users API handlers.
//!
//! ```text
//! POST /user        {"firstname":"Ada","lastname":"Lovelace"}
//! GET  /user
//! GET  /user/{id}
//! PUT  /user/{id}   {"lastname":"King"}
//! ```
//!
//! Bodies arrive as raw JSON and go through [`parse_body`] so every handler
//! reports validation failures the same way. A lookup or update that matches
//! no record answers `200` with a `null` body.

use actix_web::{get, post, put, web};
use serde_json::Value;

use crate::domain::{Error, NewUser, User, UserChanges, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CreateUserRequestSchema, ErrorSchema, UpdateUserRequestSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_body;

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequestSchema,
    responses(
        (status = 200, description = "Created user with its assigned id", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<User>> {
    let draft: NewUser = parse_body(&payload)?;
    let user = state.users.create_user(draft).await?;
    Ok(web::Json(user))
}

/// List every stored user in insertion order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backrub::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch a user by identifier.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user, or null when no record matches", body = Option<UserSchema>),
        (status = 500, description = "Internal server error, including malformed identifiers", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<User>>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_query.find_user(&id).await?;
    Ok(web::Json(user))
}

/// Replace the supplied fields of a user.
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequestSchema,
    responses(
        (status = 200, description = "The updated user, or null when no record matches", body = Option<UserSchema>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error, including malformed identifiers", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Option<User>>> {
    let id = parse_user_id(path.into_inner())?;
    let changes: UserChanges = parse_body(&payload)?;
    let user = state.users.update_user(&id, changes).await?;
    Ok(web::Json(user))
}
