//! PostgreSQL-backed `PartyRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LedgerPersistenceError, PartyRepository};
use crate::domain::{NewParty, Party, PartyId, ResourceName, UserId};

use super::error_mapping::{map_diesel_error, map_invalid_row, map_pool_error};
use super::models::{NewPartyRow, PartyRow};
use super::pool::DbPool;
use super::schema::parties;

#[derive(Clone)]
pub struct DieselPartyRepository {
    pool: DbPool,
}

impl DieselPartyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartyRepository for DieselPartyRepository {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Party>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let rows: Vec<PartyRow> = parties::table
            .filter(parties::user_id.eq(user_id.get()))
            .order(parties::id.asc())
            .select(PartyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(Party::try_from)
            .collect::<Result<_, _>>()
            .map_err(map_invalid_row)
    }

    async fn find_by_id(&self, id: PartyId) -> Result<Option<Party>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: Option<PartyRow> = parties::table
            .find(id.get())
            .select(PartyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Party::try_from).transpose().map_err(map_invalid_row)
    }

    async fn create(&self, party: &NewParty) -> Result<Party, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: PartyRow = diesel::insert_into(parties::table)
            .values(&NewPartyRow {
                user_id: party.user_id.get(),
                name: party.name.as_ref(),
            })
            .returning(PartyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Party::try_from(row).map_err(map_invalid_row)
    }

    async fn rename(
        &self,
        user_id: UserId,
        id: PartyId,
        name: &ResourceName,
    ) -> Result<Option<Party>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let name: &str = name.as_ref();

        let row: Option<PartyRow> = diesel::update(
            parties::table
                .filter(parties::id.eq(id.get()))
                .filter(parties::user_id.eq(user_id.get())),
        )
        .set(parties::name.eq(name))
        .returning(PartyRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(Party::try_from).transpose().map_err(map_invalid_row)
    }

    async fn delete(&self, user_id: UserId, id: PartyId) -> Result<bool, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            parties::table
                .filter(parties::id.eq(id.get()))
                .filter(parties::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
