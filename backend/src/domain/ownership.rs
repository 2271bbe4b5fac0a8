//! Per-resource ownership checks.
//!
//! Every read, update or delete of a single wallet, party or transaction is
//! preceded by a lookup here. The outcome is one of:
//!
//! - the resource, when `resource.user_id` equals the caller;
//! - [`OwnershipError::NotFound`] when no such resource exists;
//! - [`OwnershipError::Forbidden`] when it belongs to someone else;
//! - [`OwnershipError::Storage`] when the lookup itself failed.
//!
//! Returning the fetched resource lets handlers avoid a second read.

use serde_json::json;
use tracing::{debug, warn};

use super::ledger_support::{map_ledger_error, LedgerRepositories};
use super::ports::LedgerPersistenceError;
use super::{
    Error, Party, PartyId, ResourceKind, Transaction, TransactionId, UserId, Wallet, WalletId,
};

/// Why an ownership check did not authorise the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: i64 },
    #[error("{kind} {id} belongs to another user")]
    Forbidden { kind: ResourceKind, id: i64 },
    #[error("{kind} lookup failed: {source}")]
    Storage {
        kind: ResourceKind,
        #[source]
        source: LedgerPersistenceError,
    },
}

impl From<OwnershipError> for Error {
    fn from(value: OwnershipError) -> Self {
        match value {
            OwnershipError::NotFound { kind, id } => Error::not_found(format!("{kind} not found"))
                .with_details(json!({
                    "resource": kind.as_str(),
                    "id": id,
                    "code": "not_found",
                })),
            OwnershipError::Forbidden { kind, id } => {
                Error::forbidden(format!("{kind} belongs to another user")).with_details(json!({
                    "resource": kind.as_str(),
                    "id": id,
                    "code": "not_owner",
                }))
            }
            OwnershipError::Storage { kind, source } => map_ledger_error(kind, source),
        }
    }
}

fn authorise<R>(
    kind: ResourceKind,
    id: i64,
    requester: UserId,
    found: Result<Option<R>, LedgerPersistenceError>,
    owner_of: impl FnOnce(&R) -> UserId,
) -> Result<R, OwnershipError> {
    let resource = found
        .map_err(|source| OwnershipError::Storage { kind, source })?
        .ok_or(OwnershipError::NotFound { kind, id })?;
    let owner = owner_of(&resource);
    if owner != requester {
        warn!(
            resource = kind.as_str(),
            id,
            requester = requester.get(),
            "ownership check rejected cross-tenant access"
        );
        return Err(OwnershipError::Forbidden { kind, id });
    }
    debug!(resource = kind.as_str(), id, "ownership check passed");
    Ok(resource)
}

/// Confirms the caller owns the resource they address.
#[derive(Clone)]
pub struct OwnershipValidator {
    repos: LedgerRepositories,
}

impl OwnershipValidator {
    pub fn new(repos: LedgerRepositories) -> Self {
        Self { repos }
    }

    /// Fetch a wallet the caller owns.
    pub async fn wallet(&self, user_id: UserId, id: WalletId) -> Result<Wallet, OwnershipError> {
        let found = self.repos.wallets.find_by_id(id).await;
        authorise(ResourceKind::Wallet, id.get(), user_id, found, |w| w.user_id)
    }

    /// Fetch a party the caller owns.
    pub async fn party(&self, user_id: UserId, id: PartyId) -> Result<Party, OwnershipError> {
        let found = self.repos.parties.find_by_id(id).await;
        authorise(ResourceKind::Party, id.get(), user_id, found, |p| p.user_id)
    }

    /// Fetch a transaction the caller owns.
    pub async fn transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Transaction, OwnershipError> {
        let found = self.repos.transactions.find_by_id(id).await;
        authorise(ResourceKind::Transaction, id.get(), user_id, found, |t| {
            t.user_id
        })
    }

    /// Check both references of a transaction: the wallet first, then the
    /// party. The first failure is returned.
    pub async fn transaction_references(
        &self,
        user_id: UserId,
        wallet_id: WalletId,
        party_id: PartyId,
    ) -> Result<(Wallet, Party), OwnershipError> {
        let wallet = self.wallet(user_id, wallet_id).await?;
        let party = self.party(user_id, party_id).await?;
        Ok((wallet, party))
    }
}
