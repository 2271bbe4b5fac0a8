//! PostgreSQL-backed `TransactionRepository` implementation using Diesel ORM.
//!
//! Listing orders by `occurred_at` then id, newest first. Updates replace
//! every column, so clearing a description writes `NULL`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LedgerPersistenceError, TransactionRepository};
use crate::domain::{Transaction, TransactionDraft, TransactionId, UserId};

use super::error_mapping::{map_diesel_error, map_invalid_row, map_pool_error};
use super::models::{TransactionRow, TransactionValues};
use super::pool::DbPool;
use super::schema::transactions;

/// Diesel-backed implementation of the `TransactionRepository` port.
#[derive(Clone)]
pub struct DieselTransactionRepository {
    pool: DbPool,
}

impl DieselTransactionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn values_for(user_id: UserId, draft: &TransactionDraft) -> TransactionValues<'_> {
    TransactionValues {
        user_id: user_id.get(),
        wallet_id: draft.wallet_id.get(),
        party_id: draft.party_id.get(),
        amount: draft.amount,
        description: draft.description.as_deref(),
        occurred_at: draft.occurred_at,
    }
}

#[async_trait]
impl TransactionRepository for DieselTransactionRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Transaction>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let rows: Vec<TransactionRow> = transactions::table
            .filter(transactions::user_id.eq(user_id.get()))
            .order((transactions::occurred_at.desc(), transactions::id.desc()))
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(Transaction::try_from)
            .collect::<Result<_, _>>()
            .map_err(map_invalid_row)
    }

    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: Option<TransactionRow> = transactions::table
            .find(id.get())
            .select(TransactionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Transaction::try_from)
            .transpose()
            .map_err(map_invalid_row)
    }

    async fn create(
        &self,
        user_id: UserId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: TransactionRow = diesel::insert_into(transactions::table)
            .values(&values_for(user_id, draft))
            .returning(TransactionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Transaction::try_from(row).map_err(map_invalid_row)
    }

    async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Option<Transaction>, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: Option<TransactionRow> = diesel::update(
            transactions::table
                .filter(transactions::id.eq(id.get()))
                .filter(transactions::user_id.eq(user_id.get())),
        )
        .set(&values_for(user_id, draft))
        .returning(TransactionRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(Transaction::try_from)
            .transpose()
            .map_err(map_invalid_row)
    }

    async fn delete(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<bool, LedgerPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            transactions::table
                .filter(transactions::id.eq(id.get()))
                .filter(transactions::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
