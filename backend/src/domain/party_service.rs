//! Party use-cases on top of the ledger repositories.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ledger_support::{map_ledger_error, LedgerRepositories};
use crate::domain::ownership::OwnershipValidator;
use crate::domain::ports::PartyService;
use crate::domain::{Error, NewParty, Party, PartyId, ResourceKind, ResourceName, UserId};

/// Party service implementing the [`PartyService`] driving port.
#[derive(Clone)]
pub struct PartyLedgerService {
    repos: LedgerRepositories,
    ownership: OwnershipValidator,
}

impl PartyLedgerService {
    pub fn new(repos: LedgerRepositories) -> Self {
        let ownership = OwnershipValidator::new(repos.clone());
        Self { repos, ownership }
    }
}

fn storage_error(error: crate::domain::ports::LedgerPersistenceError) -> Error {
    map_ledger_error(ResourceKind::Party, error)
}

#[async_trait]
impl PartyService for PartyLedgerService {
    async fn list(&self, user_id: UserId) -> Result<Vec<Party>, Error> {
        self.repos
            .parties
            .list_for_user(user_id)
            .await
            .map_err(storage_error)
    }

    async fn get(&self, user_id: UserId, id: PartyId) -> Result<Party, Error> {
        Ok(self.ownership.party(user_id, id).await?)
    }

    async fn create(&self, user_id: UserId, name: &ResourceName) -> Result<Party, Error> {
        let party = self
            .repos
            .parties
            .create(&NewParty {
                user_id,
                name: name.clone(),
            })
            .await
            .map_err(storage_error)?;
        info!(user_id = user_id.get(), party_id = party.id.get(), "party created");
        Ok(party)
    }

    async fn update(
        &self,
        user_id: UserId,
        id: PartyId,
        name: &ResourceName,
    ) -> Result<Party, Error> {
        self.ownership.party(user_id, id).await?;
        self.repos
            .parties
            .rename(user_id, id, name)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found("party not found"))
    }

    async fn delete(&self, user_id: UserId, id: PartyId) -> Result<(), Error> {
        self.ownership.party(user_id, id).await?;
        if !self
            .repos
            .parties
            .delete(user_id, id)
            .await
            .map_err(storage_error)?
        {
            return Err(Error::not_found("party not found"));
        }
        info!(user_id = user_id.get(), party_id = id.get(), "party deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        LedgerPersistenceError, MockPartyRepository, MockTransactionRepository,
        MockWalletRepository,
    };

    fn party(id: i64, owner: i64) -> Party {
        Party {
            id: PartyId::new(id).expect("positive id"),
            user_id: UserId::new(owner).expect("positive id"),
            name: ResourceName::new("landlord").expect("valid name"),
        }
    }

    fn service(parties: MockPartyRepository) -> PartyLedgerService {
        PartyLedgerService::new(LedgerRepositories {
            wallets: Arc::new(MockWalletRepository::new()),
            parties: Arc::new(parties),
            transactions: Arc::new(MockTransactionRepository::new()),
        })
    }

    #[tokio::test]
    async fn owners_can_delete_their_parties() {
        let mut parties = MockPartyRepository::new();
        parties
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(party(5, 2))));
        parties
            .expect_delete()
            .withf(|owner, id| owner.get() == 2 && id.get() == 5)
            .times(1)
            .return_once(|_, _| Ok(true));

        service(parties)
            .delete(UserId::new(2).expect("id"), PartyId::new(5).expect("id"))
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn get_of_foreign_party_is_forbidden() {
        let mut parties = MockPartyRepository::new();
        parties
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(party(5, 2))));

        let err = service(parties)
            .get(UserId::new(3).expect("id"), PartyId::new(5).expect("id"))
            .await
            .expect_err("foreign party must fail");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn list_connection_failures_are_internal_errors() {
        let mut parties = MockPartyRepository::new();
        parties
            .expect_list_for_user()
            .times(1)
            .return_once(|_| Err(LedgerPersistenceError::connection("pool exhausted")));

        let err = service(parties)
            .list(UserId::new(1).expect("id"))
            .await
            .expect_err("connection failure must fail");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
