//! Port for transaction persistence.

use async_trait::async_trait;

use crate::domain::{Transaction, TransactionDraft, TransactionId, UserId};

use super::LedgerPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// All transactions owned by `user_id`, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Transaction>, LedgerPersistenceError>;

    /// Fetch a transaction regardless of owner.
    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerPersistenceError>;

    /// Insert a transaction for `user_id`.
    async fn create(
        &self,
        user_id: UserId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, LedgerPersistenceError>;

    /// Replace the fields of a transaction owned by `user_id`; `None` when no
    /// row matched.
    async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Option<Transaction>, LedgerPersistenceError>;

    /// Delete a transaction owned by `user_id`; `false` when no row matched.
    async fn delete(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<bool, LedgerPersistenceError>;
}
