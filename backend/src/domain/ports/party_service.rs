//! Driving port for party use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Party, PartyId, ResourceName, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartyService: Send + Sync {
    async fn list(&self, user_id: UserId) -> Result<Vec<Party>, Error>;

    async fn get(&self, user_id: UserId, id: PartyId) -> Result<Party, Error>;

    async fn create(&self, user_id: UserId, name: &ResourceName) -> Result<Party, Error>;

    async fn update(
        &self,
        user_id: UserId,
        id: PartyId,
        name: &ResourceName,
    ) -> Result<Party, Error>;

    async fn delete(&self, user_id: UserId, id: PartyId) -> Result<(), Error>;
}
