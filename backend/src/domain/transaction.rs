//! Transactions: money moving between a wallet and a party.
//!
//! Amounts are signed integers in minor currency units; the sign gives the
//! direction (negative for spending from the wallet). Zero-value
//! transactions are rejected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{PartyId, TransactionId, UserId, WalletId};

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX: usize = 255;

/// Validation errors for transaction payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionValidationError {
    ZeroAmount,
    DescriptionTooLong { max: usize },
}

impl TransactionValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::ZeroAmount => "amount",
            Self::DescriptionTooLong { .. } => "description",
        }
    }

    /// Stable code surfaced in error details.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::ZeroAmount => "zero_amount",
            Self::DescriptionTooLong { .. } => "description_too_long",
        }
    }
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "amount must not be zero"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// Validated transaction fields, shared by create and update.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use expense_backend::domain::{PartyId, TransactionDraft, WalletId};
///
/// let draft = TransactionDraft::try_new(
///     WalletId::new(1).unwrap(),
///     PartyId::new(2).unwrap(),
///     -1250,
///     Some("  lunch  ".to_owned()),
///     Utc::now(),
/// )
/// .expect("valid draft");
/// assert_eq!(draft.description.as_deref(), Some("lunch"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub wallet_id: WalletId,
    pub party_id: PartyId,
    pub amount: i64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl TransactionDraft {
    /// Validate raw transaction inputs. Blank descriptions become `None`.
    pub fn try_new(
        wallet_id: WalletId,
        party_id: PartyId,
        amount: i64,
        description: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, TransactionValidationError> {
        if amount == 0 {
            return Err(TransactionValidationError::ZeroAmount);
        }
        let description = description
            .map(|raw| raw.trim().to_owned())
            .filter(|text| !text.is_empty());
        if description
            .as_ref()
            .is_some_and(|text| text.chars().count() > DESCRIPTION_MAX)
        {
            return Err(TransactionValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self {
            wallet_id,
            party_id,
            amount,
            description,
            occurred_at,
        })
    }
}

/// A recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(skip)]
    pub user_id: UserId,
    pub wallet_id: WalletId,
    pub party_id: PartyId,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}
