//! PostgreSQL-backed `WalletRepository` implementation using Diesel ORM.
//!
//! Writes filter on both the wallet id and the owning user id; the
//! `wallets_user_name_key` constraint enforces per-user unique names.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LedgerPersistenceError, WalletRepository};
use crate::domain::{NewWallet, ResourceName, UserId, Wallet, WalletId};

use super::error_mapping::{map_diesel_error, map_invalid_row, map_pool_error};
use super::models::{NewWalletRow, WalletRow};
use super::pool::DbPool;
use super::schema::wallets;

/// Diesel-backed implementation of the `WalletRepository` port.
#[derive(Clone)]
pub struct DieselWalletRepository {
    pool: DbPool,
}

impl DieselWalletRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalletRepository for DieselWalletRepository {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Wallet>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let rows: Vec<WalletRow> = wallets::table
            .filter(wallets::user_id.eq(user_id.get()))
            .order(wallets::id.asc())
            .select(WalletRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(Wallet::try_from)
            .collect::<Result<_, _>>()
            .map_err(map_invalid_row)
    }

    async fn find_by_id(&self, id: WalletId) -> Result<Option<Wallet>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: Option<WalletRow> = wallets::table
            .find(id.get())
            .select(WalletRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Wallet::try_from).transpose().map_err(map_invalid_row)
    }

    async fn create(&self, wallet: &NewWallet) -> Result<Wallet, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: WalletRow = diesel::insert_into(wallets::table)
            .values(&NewWalletRow {
                user_id: wallet.user_id.get(),
                name: wallet.name.as_ref(),
            })
            .returning(WalletRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Wallet::try_from(row).map_err(map_invalid_row)
    }

    async fn rename(
        &self,
        user_id: UserId,
        id: WalletId,
        name: &ResourceName,
    ) -> Result<Option<Wallet>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let name: &str = name.as_ref();

        let row: Option<WalletRow> = diesel::update(
            wallets::table
                .filter(wallets::id.eq(id.get()))
                .filter(wallets::user_id.eq(user_id.get())),
        )
        .set(wallets::name.eq(name))
        .returning(WalletRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(Wallet::try_from).transpose().map_err(map_invalid_row)
    }

    async fn delete(&self, user_id: UserId, id: WalletId) -> Result<bool, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        // Transactions referencing the wallet go with it (ON DELETE CASCADE).
        let deleted = diesel::delete(
            wallets::table
                .filter(wallets::id.eq(id.get()))
                .filter(wallets::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
