//! Identifier and name primitives shared by users, wallets, parties and
//! transactions.
//!
//! Every identifier is a positive 64-bit integer assigned by storage. Values
//! arriving from clients (path segments, JSON bodies, token claims) must pass
//! through [`ResourceIdError`]-returning constructors before they reach a port.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised when parsing resource identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    /// The value was zero or negative.
    NotPositive { value: i64 },
    /// The value was not an integer at all.
    NotAnInteger { raw: String },
}

impl fmt::Display for ResourceIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { value } => write!(f, "id must be positive, got {value}"),
            Self::NotAnInteger { raw } => write!(f, "id must be an integer, got '{raw}'"),
        }
    }
}

impl std::error::Error for ResourceIdError {}

macro_rules! define_resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, ResourceIdError> {
                if value <= 0 {
                    return Err(ResourceIdError::NotPositive { value });
                }
                Ok(Self(value))
            }

            /// Raw integer value, as stored in the database.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ResourceIdError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let value = raw.parse::<i64>().map_err(|_| ResourceIdError::NotAnInteger {
                    raw: raw.to_owned(),
                })?;
                Self::new(value)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ResourceIdError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_resource_id! {
    /// Stable user identifier assigned at registration.
    UserId
}

define_resource_id! {
    /// Identifier of a wallet (account) owned by a user.
    WalletId
}

define_resource_id! {
    /// Identifier of a party (counterparty) owned by a user.
    PartyId
}

define_resource_id! {
    /// Identifier of a recorded transaction.
    TransactionId
}

/// Kinds of user-owned resources guarded by the ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Wallet,
    Party,
    Transaction,
}

impl ResourceKind {
    /// Lower-case label used in messages and error details.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Party => "party",
            Self::Transaction => "transaction",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum length of a wallet or party name, in characters.
pub const RESOURCE_NAME_MAX: usize = 64;

/// Validation errors for [`ResourceName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceNameError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for ResourceNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::TooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ResourceNameError {}

/// Trimmed, non-empty display name of a wallet or party.
///
/// # Examples
/// ```
/// use expense_backend::domain::ResourceName;
///
/// let name = ResourceName::new("  cash ").expect("valid name");
/// assert_eq!(name.as_ref(), "cash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    /// Validate and construct a name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ResourceNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ResourceNameError::Empty);
        }
        if trimmed.chars().count() > RESOURCE_NAME_MAX {
            return Err(ResourceNameError::TooLong {
                max: RESOURCE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ResourceName> for String {
    fn from(value: ResourceName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ResourceName {
    type Error = ResourceNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case("9223372036854775807", i64::MAX)]
    fn ids_parse_positive_integers(#[case] raw: &str, #[case] expected: i64) {
        let id: WalletId = raw.parse().expect("positive integers parse");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    fn ids_reject_non_positive_values(#[case] raw: &str) {
        let err = raw.parse::<PartyId>().expect_err("non-positive ids fail");
        assert!(matches!(err, ResourceIdError::NotPositive { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.5")]
    #[case(" 7")]
    fn ids_reject_non_integers(#[case] raw: &str) {
        let err = raw.parse::<TransactionId>().expect_err("garbage fails");
        assert!(matches!(err, ResourceIdError::NotAnInteger { .. }));
    }

    #[test]
    fn ids_deserialise_through_validation() {
        let ok: UserId = serde_json::from_str("5").expect("positive id");
        assert_eq!(ok.get(), 5);
        assert!(serde_json::from_str::<UserId>("0").is_err());
    }

    #[rstest]
    #[case("", ResourceNameError::Empty)]
    #[case("   ", ResourceNameError::Empty)]
    fn names_reject_blank_values(#[case] raw: &str, #[case] expected: ResourceNameError) {
        assert_eq!(ResourceName::new(raw), Err(expected));
    }

    #[test]
    fn names_reject_overlong_values() {
        let raw = "x".repeat(RESOURCE_NAME_MAX + 1);
        assert_eq!(
            ResourceName::new(raw),
            Err(ResourceNameError::TooLong {
                max: RESOURCE_NAME_MAX
            })
        );
    }

    #[test]
    fn names_count_characters_not_bytes() {
        let raw = "é".repeat(RESOURCE_NAME_MAX);
        assert!(ResourceName::new(raw).is_ok());
    }
}
