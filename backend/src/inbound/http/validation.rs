//! Request body validation for the users endpoints.
//!
//! Handlers receive the raw JSON value and hand it to [`parse_body`], which
//! returns either the domain value or the first [`FieldViolation`] rendered as
//! an `invalid_request` error. Validation happens before any store call.

use serde_json::{Map, Value, json};

use crate::domain::{Error, NewUser, PersonName, UserChanges, UserValidationError};

/// Machine-readable reason attached to a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViolationCode {
    InvalidBody,
    MissingField,
    InvalidType,
    EmptyValue,
    TooLong,
    InvalidCharacter,
    UnknownField,
}

impl ViolationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBody => "invalid_body",
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::EmptyValue => "empty_value",
            Self::TooLong => "too_long",
            Self::InvalidCharacter => "invalid_character",
            Self::UnknownField => "unknown_field",
        }
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

const FIRSTNAME: FieldName = FieldName::new("firstname");
const LASTNAME: FieldName = FieldName::new("lastname");
const USER_FIELDS: [FieldName; 2] = [FIRSTNAME, LASTNAME];

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldViolation {
    field: String,
    code: ViolationCode,
    message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    fn missing(field: FieldName) -> Self {
        let name = field.as_str();
        Self::new(
            name,
            ViolationCode::MissingField,
            format!("missing required field: {name}"),
        )
    }

    fn not_a_string(field: FieldName) -> Self {
        let name = field.as_str();
        Self::new(
            name,
            ViolationCode::InvalidType,
            format!("{name} must be a string"),
        )
    }

    fn unknown(field: &str) -> Self {
        Self::new(
            field,
            ViolationCode::UnknownField,
            format!("unknown field: {field}"),
        )
    }

    fn from_name_error(field: FieldName, err: &UserValidationError) -> Self {
        let name = field.as_str();
        match err {
            UserValidationError::NameTooLong { max } => Self::new(
                name,
                ViolationCode::TooLong,
                format!("{name} must be at most {max} characters"),
            ),
            UserValidationError::ControlCharacter => Self::new(
                name,
                ViolationCode::InvalidCharacter,
                format!("{name} must not contain control characters"),
            ),
            UserValidationError::EmptyName | UserValidationError::EmptyId => Self::new(
                name,
                ViolationCode::EmptyValue,
                format!("{name} must not be empty"),
            ),
        }
    }
}

impl From<FieldViolation> for Error {
    fn from(violation: FieldViolation) -> Self {
        let FieldViolation {
            field,
            code,
            message,
        } = violation;
        let details = if field.is_empty() {
            json!({ "code": code.as_str() })
        } else {
            json!({ "field": field, "code": code.as_str() })
        };
        Self::invalid_request(message).with_details(details)
    }
}

/// Typed view over a JSON request body.
pub(crate) trait FromJsonBody: Sized {
    /// Validate the body, collecting every violation in field order.
    fn from_json_body(body: &Value) -> Result<Self, Vec<FieldViolation>>;
}

/// Validate `body` into `T`, reporting the first violation as an error.
pub(crate) fn parse_body<T: FromJsonBody>(body: &Value) -> Result<T, Error> {
    T::from_json_body(body).map_err(|violations| {
        violations.into_iter().next().map_or_else(
            || Error::invalid_request("request body is invalid"),
            Error::from,
        )
    })
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, Vec<FieldViolation>> {
    body.as_object().ok_or_else(|| {
        vec![FieldViolation::new(
            "",
            ViolationCode::InvalidBody,
            "request body must be a JSON object",
        )]
    })
}

fn unknown_fields(object: &Map<String, Value>) -> impl Iterator<Item = FieldViolation> + '_ {
    object
        .keys()
        .filter(|key| !USER_FIELDS.iter().any(|field| field.as_str() == key.as_str()))
        .map(|key| FieldViolation::unknown(key))
}

fn optional_name(
    object: &Map<String, Value>,
    field: FieldName,
) -> Result<Option<PersonName>, FieldViolation> {
    match object.get(field.as_str()) {
        None => Ok(None),
        Some(Value::String(raw)) => PersonName::new(raw.as_str())
            .map(Some)
            .map_err(|err| FieldViolation::from_name_error(field, &err)),
        Some(_) => Err(FieldViolation::not_a_string(field)),
    }
}

fn required_name(
    object: &Map<String, Value>,
    field: FieldName,
) -> Result<PersonName, FieldViolation> {
    optional_name(object, field)?.ok_or_else(|| FieldViolation::missing(field))
}

impl FromJsonBody for NewUser {
    fn from_json_body(body: &Value) -> Result<Self, Vec<FieldViolation>> {
        let object = as_object(body)?;
        let firstname = required_name(object, FIRSTNAME);
        let lastname = required_name(object, LASTNAME);
        let mut violations: Vec<FieldViolation> = [&firstname, &lastname]
            .into_iter()
            .filter_map(|result| result.as_ref().err().cloned())
            .collect();
        violations.extend(unknown_fields(object));

        match (firstname, lastname) {
            (Ok(firstname), Ok(lastname)) if violations.is_empty() => {
                Ok(NewUser::new(firstname, lastname))
            }
            _ => Err(violations),
        }
    }
}

impl FromJsonBody for UserChanges {
    fn from_json_body(body: &Value) -> Result<Self, Vec<FieldViolation>> {
        let object = as_object(body)?;
        let firstname = optional_name(object, FIRSTNAME);
        let lastname = optional_name(object, LASTNAME);
        let mut violations: Vec<FieldViolation> = [&firstname, &lastname]
            .into_iter()
            .filter_map(|result| result.as_ref().err().cloned())
            .collect();
        violations.extend(unknown_fields(object));

        match (firstname, lastname) {
            (Ok(firstname), Ok(lastname)) if violations.is_empty() => {
                let mut changes = UserChanges::default();
                if let Some(name) = firstname {
                    changes = changes.with_firstname(name);
                }
                if let Some(name) = lastname {
                    changes = changes.with_lastname(name);
                }
                Ok(changes)
            }
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, NAME_MAX};
    use rstest::rstest;

    fn create_violations(body: Value) -> Vec<FieldViolation> {
        NewUser::from_json_body(&body).expect_err("body should be rejected")
    }

    #[rstest]
    fn create_accepts_both_names() {
        let draft = NewUser::from_json_body(&json!({"firstname": "Ada", "lastname": "Lovelace"}))
            .expect("valid body");
        assert_eq!(draft.firstname().as_ref(), "Ada");
        assert_eq!(draft.lastname().as_ref(), "Lovelace");
    }

    #[rstest]
    #[case(json!({"lastname": "Lovelace"}), "firstname", ViolationCode::MissingField)]
    #[case(json!({"firstname": "Ada"}), "lastname", ViolationCode::MissingField)]
    #[case(json!({"firstname": 7, "lastname": "Lovelace"}), "firstname", ViolationCode::InvalidType)]
    #[case(json!({"firstname": null, "lastname": "Lovelace"}), "firstname", ViolationCode::InvalidType)]
    #[case(json!({"firstname": "Ada", "lastname": "  "}), "lastname", ViolationCode::EmptyValue)]
    #[case(json!({"firstname": "a\u{0000}b", "lastname": "Lovelace"}), "firstname", ViolationCode::InvalidCharacter)]
    #[case(json!({"firstname": "Ada", "lastname": "Lovelace", "age": 36}), "age", ViolationCode::UnknownField)]
    fn create_reports_first_violation(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: ViolationCode,
    ) {
        let violations = create_violations(body);
        let first = violations.first().expect("at least one violation");
        assert_eq!(first.field, field);
        assert_eq!(first.code, code);
    }

    #[rstest]
    fn create_collects_violations_in_field_order() {
        let violations = create_violations(json!({"extra": true}));
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["firstname", "lastname", "extra"]);
    }

    #[rstest]
    fn create_rejects_overlong_names() {
        let long = "x".repeat(NAME_MAX + 1);
        let violations = create_violations(json!({"firstname": long, "lastname": "Lovelace"}));
        assert_eq!(violations[0].code, ViolationCode::TooLong);
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!("Ada"))]
    #[case(Value::Null)]
    fn non_object_bodies_are_rejected(#[case] body: Value) {
        let err = parse_body::<NewUser>(&body).expect_err("non-object body");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "request body must be a JSON object");
        assert_eq!(err.details(), Some(&json!({"code": "invalid_body"})));
    }

    #[rstest]
    fn parse_body_surfaces_field_and_code() {
        let err = parse_body::<NewUser>(&json!({"lastname": "Lovelace"})).expect_err("missing");
        assert_eq!(err.message(), "missing required field: firstname");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "firstname", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn update_accepts_empty_object() {
        let changes = UserChanges::from_json_body(&json!({})).expect("empty update");
        assert!(changes.is_empty());
    }

    #[rstest]
    fn update_keeps_only_supplied_fields() {
        let changes =
            UserChanges::from_json_body(&json!({"lastname": "King"})).expect("valid update");
        assert!(changes.firstname().is_none());
        assert_eq!(changes.lastname().map(AsRef::as_ref), Some("King"));
    }

    #[rstest]
    #[case(json!({"firstname": ""}), "firstname", ViolationCode::EmptyValue)]
    #[case(json!({"lastname": false}), "lastname", ViolationCode::InvalidType)]
    #[case(json!({"lastname": "King\u{0000}"}), "lastname", ViolationCode::InvalidCharacter)]
    #[case(json!({"id": "abc"}), "id", ViolationCode::UnknownField)]
    fn update_rejects_bad_fields(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: ViolationCode,
    ) {
        let violations = UserChanges::from_json_body(&body).expect_err("rejected");
        assert_eq!(violations[0].field, field);
        assert_eq!(violations[0].code, code);
    }
}
