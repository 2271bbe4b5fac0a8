//! Port for wallet persistence.
//!
//! Writes take the owning user's id as well as the wallet id so adapters can
//! filter on both; a wallet that changed hands (or vanished) after the
//! ownership check is reported as absent instead of being mutated.

use async_trait::async_trait;

use crate::domain::{NewWallet, ResourceName, UserId, Wallet, WalletId};

use super::LedgerPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// All wallets owned by `user_id`, ordered by id.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Wallet>, LedgerPersistenceError>;

    /// Fetch a wallet regardless of owner.
    async fn find_by_id(&self, id: WalletId) -> Result<Option<Wallet>, LedgerPersistenceError>;

    /// Insert a wallet. Duplicate names for one user raise `UniqueViolation`.
    async fn create(&self, wallet: &NewWallet) -> Result<Wallet, LedgerPersistenceError>;

    /// Rename a wallet owned by `user_id`; `None` when no row matched.
    async fn rename(
        &self,
        user_id: UserId,
        id: WalletId,
        name: &ResourceName,
    ) -> Result<Option<Wallet>, LedgerPersistenceError>;

    /// Delete a wallet owned by `user_id`; `false` when no row matched.
    async fn delete(&self, user_id: UserId, id: WalletId) -> Result<bool, LedgerPersistenceError>;
}
