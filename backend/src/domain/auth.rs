//! Authentication primitives: login credentials and sign-up requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::password::{validate_password_strength, Password, PasswordPolicyError};
use super::user::{normalize_email, EmailAddress, EmailValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    MissingEmail,
    /// Password was blank.
    MissingPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEmail => write!(f, "email must not be empty"),
            Self::MissingPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. Its shape is not checked
///   here: an unknown address is reported by the lookup, not by validation.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use expense_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password().as_str(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(LoginValidationError::MissingEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::MissingPassword);
        }

        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Reasons a sign-up payload is rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpValidationError {
    /// First or last name was blank.
    MissingName { field: &'static str },
    InvalidEmail(EmailValidationError),
    WeakPassword(PasswordPolicyError),
}

impl SignUpValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName { field } => *field,
            Self::InvalidEmail(_) => "email",
            Self::WeakPassword(_) => "password",
        }
    }

    /// Stable code surfaced in error details.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingName { .. } => "missing_name",
            Self::InvalidEmail(_) => "invalid_email",
            Self::WeakPassword(policy) => policy.code(),
        }
    }
}

impl fmt::Display for SignUpValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName { field } => write!(f, "{field} must not be empty"),
            Self::InvalidEmail(error) => write!(f, "{error}"),
            Self::WeakPassword(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SignUpValidationError {}

/// Validated registration request.
///
/// Checks run in order: names, then email shape, then password policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    first_name: String,
    last_name: String,
    email: EmailAddress,
    password: Password,
}

impl SignUpRequest {
    /// Validate raw sign-up inputs.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, SignUpValidationError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(SignUpValidationError::MissingName {
                field: "firstName",
            });
        }
        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(SignUpValidationError::MissingName { field: "lastName" });
        }
        let email = EmailAddress::new(email).map_err(SignUpValidationError::InvalidEmail)?;
        validate_password_strength(password).map_err(SignUpValidationError::WeakPassword)?;

        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}
