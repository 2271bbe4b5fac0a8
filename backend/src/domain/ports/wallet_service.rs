//! Driving port for wallet use-cases.
//!
//! Every method takes the authenticated caller; single-wallet operations
//! fail with `forbidden` when the wallet belongs to someone else.

use async_trait::async_trait;

use crate::domain::{Error, ResourceName, UserId, Wallet, WalletId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletService: Send + Sync {
    async fn list(&self, user_id: UserId) -> Result<Vec<Wallet>, Error>;

    async fn get(&self, user_id: UserId, id: WalletId) -> Result<Wallet, Error>;

    async fn create(&self, user_id: UserId, name: &ResourceName) -> Result<Wallet, Error>;

    async fn update(
        &self,
        user_id: UserId,
        id: WalletId,
        name: &ResourceName,
    ) -> Result<Wallet, Error>;

    async fn delete(&self, user_id: UserId, id: WalletId) -> Result<(), Error>;
}
