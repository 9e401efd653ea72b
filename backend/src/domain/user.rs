//! User data model.
//!
//! A user is a stored record with a store-assigned identifier and two names.
//! [`NewUser`] carries the fields for a record that does not exist yet and
//! [`UserChanges`] the fields a client wants replaced on an existing one.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed length, in characters, of a first or last name.
pub const NAME_MAX: usize = 100;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The name was empty or whitespace.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeded [`NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The name contained a control character such as NUL or a newline.
    #[error("name must not contain control characters")]
    ControlCharacter,
}

/// Opaque user identifier assigned by the persistence layer.
///
/// The domain only requires the identifier to be non-empty. Whether a value
/// is well formed is for the store to decide, so a malformed identifier
/// surfaces as a persistence failure rather than a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Build an identifier from a UUID issued by a store.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A first or last name.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace.
/// - At most [`NAME_MAX`] characters.
/// - No control characters.
///
/// The value is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    ///
    /// # Examples
    /// ```
    /// use backrub::domain::PersonName;
    ///
    /// assert!(PersonName::new("Ada").is_ok());
    /// assert!(PersonName::new("  ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        if name.chars().any(char::is_control) {
            return Err(UserValidationError::ControlCharacter);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user record.
///
/// Serialises as `{"id": "...", "firstname": "...", "lastname": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    firstname: PersonName,
    lastname: PersonName,
}

impl User {
    /// Build a user from validated components.
    #[must_use]
    pub fn new(id: UserId, firstname: PersonName, lastname: PersonName) -> Self {
        Self {
            id,
            firstname,
            lastname,
        }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            PersonName::new(firstname)?,
            PersonName::new(lastname)?,
        ))
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// First name.
    pub fn firstname(&self) -> &PersonName {
        &self.firstname
    }

    /// Last name.
    pub fn lastname(&self) -> &PersonName {
        &self.lastname
    }
}

/// Fields for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    firstname: PersonName,
    lastname: PersonName,
}

impl NewUser {
    /// Bundle the required names.
    #[must_use]
    pub fn new(firstname: PersonName, lastname: PersonName) -> Self {
        Self {
            firstname,
            lastname,
        }
    }

    /// First name.
    pub fn firstname(&self) -> &PersonName {
        &self.firstname
    }

    /// Last name.
    pub fn lastname(&self) -> &PersonName {
        &self.lastname
    }

    /// Attach a store-assigned identifier, producing the stored record.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.firstname, self.lastname)
    }
}

/// Field replacements for an existing user.
///
/// Fields left as `None` keep their stored value.
///
/// # Examples
/// ```
/// use backrub::domain::{PersonName, User, UserChanges};
///
/// let user = User::try_from_strings("42", "Ada", "Lovelace").expect("valid user");
/// let changes = UserChanges::default().with_lastname(PersonName::new("King").expect("name"));
/// let updated = changes.apply_to(&user);
/// assert_eq!(updated.firstname().as_ref(), "Ada");
/// assert_eq!(updated.lastname().as_ref(), "King");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    firstname: Option<PersonName>,
    lastname: Option<PersonName>,
}

impl UserChanges {
    /// Replace the first name.
    #[must_use]
    pub fn with_firstname(mut self, firstname: PersonName) -> Self {
        self.firstname = Some(firstname);
        self
    }

    /// Replace the last name.
    #[must_use]
    pub fn with_lastname(mut self, lastname: PersonName) -> Self {
        self.lastname = Some(lastname);
        self
    }

    /// Replacement first name, if any.
    pub fn firstname(&self) -> Option<&PersonName> {
        self.firstname.as_ref()
    }

    /// Replacement last name, if any.
    pub fn lastname(&self) -> Option<&PersonName> {
        self.lastname.as_ref()
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none() && self.lastname.is_none()
    }

    /// Produce the record that results from applying these changes.
    #[must_use]
    pub fn apply_to(&self, user: &User) -> User {
        User::new(
            user.id.clone(),
            self.firstname
                .clone()
                .unwrap_or_else(|| user.firstname.clone()),
            self.lastname
                .clone()
                .unwrap_or_else(|| user.lastname.clone()),
        )
    }
}
