//! User data model.
//!
//! A user owns wallets, parties and transactions. The record stored for a
//! user also carries its [`Credential`], but the credential never leaves the
//! domain: [`User`] is the shape adapters serialise.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::password::Credential;
use super::UserId;

/// Minimum length of an email address, in characters.
pub const EMAIL_MIN: usize = 3;
/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    InvalidLength { min: usize, max: usize },
    InvalidFormat,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::InvalidLength { min, max } => {
                write!(f, "email must be between {min} and {max} characters")
            }
            Self::InvalidFormat => write!(f, "email address is not well formed"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

// Length is enforced separately; this regex constrains the shape.
#[expect(clippy::expect_used, reason = "the pattern is a compile-time literal")]
fn compile_email_regex() -> Regex {
    Regex::new(concat!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    ))
    .expect("email pattern compiles")
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(compile_email_regex);

/// Normalise an email for storage and lookup: trimmed and lower-cased.
///
/// # Examples
/// ```
/// use expense_backend::domain::normalize_email;
///
/// assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
/// ```
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validated and normalised email address.
///
/// ## Invariants
/// - Lower-case and trimmed, so equality is case-insensitive on input.
/// - Between [`EMAIL_MIN`] and [`EMAIL_MAX`] characters with exactly one `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an address from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let normalised = normalize_email(raw.as_ref());
        if normalised.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        let length = normalised.chars().count();
        if !(EMAIL_MIN..=EMAIL_MAX).contains(&length) {
            return Err(EmailValidationError::InvalidLength {
                min: EMAIL_MIN,
                max: EMAIL_MAX,
            });
        }
        if !EMAIL_RE.is_match(&normalised) {
            return Err(EmailValidationError::InvalidFormat);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered application user.
///
/// # Examples
/// ```
/// use expense_backend::domain::{EmailAddress, User, UserId};
///
/// let user = User::new(
///     UserId::new(1).expect("positive id"),
///     "Ada",
///     "Lovelace",
///     EmailAddress::new("ada@example.com").expect("valid email"),
/// );
/// assert_eq!(user.first_name(), "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: EmailAddress,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: EmailAddress,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
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
}

/// Data required to persist a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub credential: Credential,
}

/// Stored user together with its credential, as loaded for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub credential: Credential,
}
