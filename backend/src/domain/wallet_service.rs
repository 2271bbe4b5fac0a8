//! Wallet use-cases on top of the ledger repositories.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ledger_support::{map_ledger_error, LedgerRepositories};
use crate::domain::ownership::OwnershipValidator;
use crate::domain::ports::WalletService;
use crate::domain::{Error, NewWallet, ResourceKind, ResourceName, UserId, Wallet, WalletId};

fn wallet_not_found() -> Error {
    Error::not_found("wallet not found")
}

/// Wallet service implementing the [`WalletService`] driving port.
#[derive(Clone)]
pub struct WalletLedgerService {
    repos: LedgerRepositories,
    ownership: OwnershipValidator,
}

impl WalletLedgerService {
    pub fn new(repos: LedgerRepositories) -> Self {
        let ownership = OwnershipValidator::new(repos.clone());
        Self { repos, ownership }
    }
}

#[async_trait]
impl WalletService for WalletLedgerService {
    async fn list(&self, user_id: UserId) -> Result<Vec<Wallet>, Error> {
        self.repos
            .wallets
            .list_for_user(user_id)
            .await
            .map_err(|error| map_ledger_error(ResourceKind::Wallet, error))
    }

    async fn get(&self, user_id: UserId, id: WalletId) -> Result<Wallet, Error> {
        Ok(self.ownership.wallet(user_id, id).await?)
    }

    async fn create(&self, user_id: UserId, name: &ResourceName) -> Result<Wallet, Error> {
        let wallet = self
            .repos
            .wallets
            .create(&NewWallet {
                user_id,
                name: name.clone(),
            })
            .await
            .map_err(|error| map_ledger_error(ResourceKind::Wallet, error))?;
        info!(user_id = user_id.get(), wallet_id = wallet.id.get(), "wallet created");
        Ok(wallet)
    }

    async fn update(
        &self,
        user_id: UserId,
        id: WalletId,
        name: &ResourceName,
    ) -> Result<Wallet, Error> {
        self.ownership.wallet(user_id, id).await?;
        self.repos
            .wallets
            .rename(user_id, id, name)
            .await
            .map_err(|error| map_ledger_error(ResourceKind::Wallet, error))?
            .ok_or_else(wallet_not_found)
    }

    async fn delete(&self, user_id: UserId, id: WalletId) -> Result<(), Error> {
        self.ownership.wallet(user_id, id).await?;
        let removed = self
            .repos
            .wallets
            .delete(user_id, id)
            .await
            .map_err(|error| map_ledger_error(ResourceKind::Wallet, error))?;
        if !removed {
            return Err(wallet_not_found());
        }
        info!(user_id = user_id.get(), wallet_id = id.get(), "wallet deleted");
        Ok(())
    }
}
