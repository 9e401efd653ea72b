//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the strongly typed user model and the use-cases the HTTP
//! adapter drives. Types here stay free of HTTP and database concerns.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error payload.
//! - `User`, `UserId`, `PersonName`, `NewUser`, `UserChanges`: user model.
//! - `UserService`: use-cases over a `ports::UserRepository`.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{NAME_MAX, NewUser, PersonName, User, UserChanges, UserId, UserValidationError};
pub use self::user_service::UserService;
