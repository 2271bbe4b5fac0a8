//! Port for party persistence. Mirrors [`super::WalletRepository`].

use async_trait::async_trait;

use crate::domain::{NewParty, Party, PartyId, ResourceName, UserId};

use super::LedgerPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartyRepository: Send + Sync {
    /// All parties owned by `user_id`, ordered by id.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Party>, LedgerPersistenceError>;

    /// Fetch a party regardless of owner.
    async fn find_by_id(&self, id: PartyId) -> Result<Option<Party>, LedgerPersistenceError>;

    /// Insert a party. Duplicate names for one user raise `UniqueViolation`.
    async fn create(&self, party: &NewParty) -> Result<Party, LedgerPersistenceError>;

    /// Rename a party owned by `user_id`; `None` when no row matched.
    async fn rename(
        &self,
        user_id: UserId,
        id: PartyId,
        name: &ResourceName,
    ) -> Result<Option<Party>, LedgerPersistenceError>;

    /// Delete a party owned by `user_id`; `false` when no row matched.
    async fn delete(&self, user_id: UserId, id: PartyId) -> Result<bool, LedgerPersistenceError>;
}
