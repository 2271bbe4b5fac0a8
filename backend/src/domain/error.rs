//! The error payload shared by every driving port.
//!
//! [`Error`] knows nothing about HTTP. The inbound adapter maps
//! [`ErrorCode`] onto a status and serialises the payload as the response
//! body: `{code, message, traceId?, details?}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

use super::TraceId;

/// Failure category. Serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input or a failed validation rule.
    InvalidRequest,
    /// Missing or rejected credentials.
    Unauthorized,
    /// The caller does not own the resource.
    Forbidden,
    NotFound,
    /// Duplicate email or resource name.
    Conflict,
    /// Storage or another dependency cannot be reached.
    ServiceUnavailable,
    InternalError,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }
}

/// Reasons [`Error::try_new`] refuses a payload.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// A failure reported to a client.
///
/// The message is never blank. Errors built while a request scope is open
/// record that request's [`TraceId`].
///
/// # Examples
/// ```
/// use expense_backend::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::conflict("wallet name already used")
///     .with_details(json!({ "code": "duplicate_name" }));
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert_eq!(err.to_string(), "wallet name already used");
/// ```
#[derive(Debug, Clone, PartialEq, ThisError, Serialize, Deserialize)]
#[error("{message}")]
#[serde(try_from = "ErrorBody", into = "ErrorBody")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

macro_rules! shorthand {
    ($($(#[$meta:meta])* $name:ident => $code:ident;)+) => {
        $(
            $(#[$meta])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    /// Build an error, panicking on a blank message.
    ///
    /// Messages passed here are literals or formatted from non-empty parts;
    /// use [`Error::try_new`] for anything that came off the wire.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message)
            .unwrap_or_else(|err| panic!("invalid error payload: {err}"))
    }

    /// Build an error, rejecting blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    shorthand! {
        /// [`ErrorCode::InvalidRequest`] shorthand.
        invalid_request => InvalidRequest;
        /// [`ErrorCode::Unauthorized`] shorthand.
        unauthorized => Unauthorized;
        /// [`ErrorCode::Forbidden`] shorthand.
        forbidden => Forbidden;
        /// [`ErrorCode::NotFound`] shorthand.
        not_found => NotFound;
        /// [`ErrorCode::Conflict`] shorthand.
        conflict => Conflict;
        /// [`ErrorCode::ServiceUnavailable`] shorthand.
        service_unavailable => ServiceUnavailable;
        /// [`ErrorCode::InternalError`] shorthand.
        internal => InternalError;
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Identifier of the request that raised the error, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured context such as the offending field or a sub-code.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the recorded trace identifier.
    ///
    /// # Examples
    /// ```
    /// use expense_backend::domain::Error;
    ///
    /// let err = Error::forbidden("nope").with_trace_id("abc");
    /// assert_eq!(err.trace_id(), Some("abc"));
    /// ```
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

/// Wire shape of [`Error`]; deserialising goes back through validation.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorBody {
    fn from(error: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = error;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<ErrorBody> for Error {
    type Error = ErrorValidationError;

    fn try_from(body: ErrorBody) -> Result<Self, Self::Error> {
        let error = Self::try_new(body.code, body.message)?;
        Ok(Self {
            trace_id: body.trace_id,
            details: body.details,
            ..error
        })
    }
}
