//! Plumbing shared by the wallet, party and transaction services.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{
    LedgerPersistenceError, PartyRepository, TransactionRepository, WalletRepository,
};
use crate::domain::{Error, ResourceKind};

/// The three ledger repositories, bundled so services and the ownership
/// validator are built from the same adapters.
#[derive(Clone)]
pub struct LedgerRepositories {
    pub wallets: Arc<dyn WalletRepository>,
    pub parties: Arc<dyn PartyRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
}

impl LedgerRepositories {
    /// Use one adapter for all three ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use expense_backend::domain::LedgerRepositories;
    /// use expense_backend::outbound::memory::InMemoryStore;
    ///
    /// let repos = LedgerRepositories::from_store(Arc::new(InMemoryStore::default()));
    /// let _wallets = repos.wallets.clone();
    /// ```
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: WalletRepository + PartyRepository + TransactionRepository + 'static,
    {
        Self {
            wallets: store.clone(),
            parties: store.clone(),
            transactions: store,
        }
    }
}

/// Map a ledger persistence failure onto the domain error for `kind`.
///
/// Duplicate names are `conflict`; every other storage failure, connection
/// loss included, is an internal error.
pub(crate) fn map_ledger_error(kind: ResourceKind, error: LedgerPersistenceError) -> Error {
    match error {
        LedgerPersistenceError::Connection { message }
        | LedgerPersistenceError::Query { message } => {
            Error::internal(format!("{kind} repository error: {message}"))
        }
        LedgerPersistenceError::UniqueViolation { .. } => {
            Error::conflict(format!("a {kind} with this name already exists")).with_details(
                json!({
                    "field": "name",
                    "code": "duplicate_name",
                }),
            )
        }
    }
}
