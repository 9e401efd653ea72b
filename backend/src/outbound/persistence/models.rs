//! Row types mapping the `users` table to Rust.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;

/// Row read back from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
}

/// Insert payload; `created_at` comes from the column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub firstname: &'a str,
    pub lastname: &'a str,
}

/// Partial update; `None` columns are left out of the `SET` clause.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub firstname: Option<&'a str>,
    pub lastname: Option<&'a str>,
}
