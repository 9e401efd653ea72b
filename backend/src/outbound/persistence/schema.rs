//! Diesel table definitions.
//!
//! Kept in sync with `backend/migrations` by hand.

diesel::table! {
    /// Stored user records.
    users (id) {
        /// Store-assigned identifier.
        id -> Uuid,
        /// First name.
        firstname -> Varchar,
        /// Last name.
        lastname -> Varchar,
        /// Insertion time, used only for ordering.
        created_at -> Timestamptz,
    }
}
