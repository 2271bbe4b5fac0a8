//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` error whose details carry the
//! offending `field` and a stable `code`.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, ResourceIdError, ResourceNameError, SignUpValidationError,
    TransactionValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidName,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidName => "invalid_name",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
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

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField.as_str(),
        format!("missing required field: {field}"),
    )
}

/// Unwrap an optional body field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Convert a body-supplied integer into a typed resource id.
pub(crate) fn parse_resource_id<T>(raw: i64, field: FieldName) -> Result<T, Error>
where
    T: TryFrom<i64, Error = ResourceIdError>,
{
    T::try_from(raw).map_err(|err| {
        field_error(
            field.as_str(),
            ErrorCode::InvalidId.as_str(),
            format!("{}: {err}", field.as_str()),
        )
    })
}

pub(crate) fn resource_name_error(err: ResourceNameError) -> Error {
    field_error("name", ErrorCode::InvalidName.as_str(), err.to_string())
}

pub(crate) fn parse_rfc3339_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let field = field.as_str();
            field_error(
                field,
                ErrorCode::InvalidTimestamp.as_str(),
                format!("{field} must be an RFC 3339 timestamp"),
            )
        })
}

pub(crate) fn sign_up_error(err: &SignUpValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn login_error(err: &LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::MissingEmail => ("email", "missing_credentials"),
        LoginValidationError::MissingPassword => ("password", "missing_credentials"),
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn transaction_error(err: TransactionValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}
