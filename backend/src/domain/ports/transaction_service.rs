//! Driving port for transaction use-cases.
//!
//! Create and update also require the caller to own the referenced wallet
//! and party.

use async_trait::async_trait;

use crate::domain::{Error, Transaction, TransactionDraft, TransactionId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn list(&self, user_id: UserId) -> Result<Vec<Transaction>, Error>;

    async fn get(&self, user_id: UserId, id: TransactionId) -> Result<Transaction, Error>;

    async fn create(
        &self,
        user_id: UserId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error>;

    async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error>;

    async fn delete(&self, user_id: UserId, id: TransactionId) -> Result<(), Error>;
}
