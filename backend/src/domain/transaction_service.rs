//! Transaction use-cases.
//!
//! Besides owning the transaction itself, callers must own the wallet and
//! party a transaction references. Both are checked on create and on update,
//! so a transaction can never be re-pointed at another user's wallet.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ledger_support::{map_ledger_error, LedgerRepositories};
use crate::domain::ownership::OwnershipValidator;
use crate::domain::ports::{LedgerPersistenceError, TransactionService};
use crate::domain::{
    Error, ResourceKind, Transaction, TransactionDraft, TransactionId, UserId,
};

fn storage_error(error: LedgerPersistenceError) -> Error {
    map_ledger_error(ResourceKind::Transaction, error)
}

/// Transaction service implementing the [`TransactionService`] driving port.
#[derive(Clone)]
pub struct TransactionLedgerService {
    repos: LedgerRepositories,
    ownership: OwnershipValidator,
}

impl TransactionLedgerService {
    pub fn new(repos: LedgerRepositories) -> Self {
        let ownership = OwnershipValidator::new(repos.clone());
        Self { repos, ownership }
    }
}

#[async_trait]
impl TransactionService for TransactionLedgerService {
    async fn list(&self, user_id: UserId) -> Result<Vec<Transaction>, Error> {
        self.repos
            .transactions
            .list_for_user(user_id)
            .await
            .map_err(storage_error)
    }

    async fn get(&self, user_id: UserId, id: TransactionId) -> Result<Transaction, Error> {
        Ok(self.ownership.transaction(user_id, id).await?)
    }

    async fn create(
        &self,
        user_id: UserId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error> {
        self.ownership
            .transaction_references(user_id, draft.wallet_id, draft.party_id)
            .await?;
        let transaction = self
            .repos
            .transactions
            .create(user_id, draft)
            .await
            .map_err(storage_error)?;
        info!(
            user_id = user_id.get(),
            transaction_id = transaction.id.get(),
            "transaction recorded"
        );
        Ok(transaction)
    }

    async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error> {
        self.ownership.transaction(user_id, id).await?;
        self.ownership
            .transaction_references(user_id, draft.wallet_id, draft.party_id)
            .await?;
        self.repos
            .transactions
            .update(user_id, id, draft)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found("transaction not found"))
    }

    async fn delete(&self, user_id: UserId, id: TransactionId) -> Result<(), Error> {
        self.ownership.transaction(user_id, id).await?;
        let removed = self
            .repos
            .transactions
            .delete(user_id, id)
            .await
            .map_err(storage_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("transaction not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{
        MockPartyRepository, MockTransactionRepository, MockWalletRepository,
    };
    use crate::domain::{ErrorCode, Party, PartyId, ResourceName, Wallet, WalletId};

    fn user(id: i64) -> UserId {
        UserId::new(id).expect("positive id")
    }

    fn wallet(owner: i64) -> Wallet {
        Wallet {
            id: WalletId::new(1).expect("id"),
            user_id: user(owner),
            name: ResourceName::new("cash").expect("valid name"),
        }
    }

    fn party(owner: i64) -> Party {
        Party {
            id: PartyId::new(2).expect("id"),
            user_id: user(owner),
            name: ResourceName::new("grocer").expect("valid name"),
        }
    }

    #[fixture]
    fn draft() -> TransactionDraft {
        TransactionDraft::try_new(
            WalletId::new(1).expect("id"),
            PartyId::new(2).expect("id"),
            -1250,
            Some("weekly shop".to_owned()),
            Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        )
        .expect("valid draft")
    }

    fn recorded(draft: &TransactionDraft, owner: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(40).expect("id"),
            user_id: user(owner),
            wallet_id: draft.wallet_id,
            party_id: draft.party_id,
            amount: draft.amount,
            description: draft.description.clone(),
            occurred_at: draft.occurred_at,
        }
    }

    fn service(
        wallets: MockWalletRepository,
        parties: MockPartyRepository,
        transactions: MockTransactionRepository,
    ) -> TransactionLedgerService {
        TransactionLedgerService::new(LedgerRepositories {
            wallets: Arc::new(wallets),
            parties: Arc::new(parties),
            transactions: Arc::new(transactions),
        })
    }

    #[rstest]
    #[tokio::test]
    async fn create_requires_owned_wallet_and_party(draft: TransactionDraft) {
        let mut wallets = MockWalletRepository::new();
        wallets
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(wallet(1))));
        let mut parties = MockPartyRepository::new();
        parties
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(party(1))));
        let stored = recorded(&draft, 1);
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_create()
            .times(1)
            .return_once(move |_, _| Ok(stored));

        let created = service(wallets, parties, transactions)
            .create(user(1), &draft)
            .await
            .expect("create succeeds");
        assert_eq!(created.amount, -1250);
    }

    #[rstest]
    #[tokio::test]
    async fn create_against_foreign_party_is_forbidden(draft: TransactionDraft) {
        let mut wallets = MockWalletRepository::new();
        wallets
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(wallet(1))));
        let mut parties = MockPartyRepository::new();
        parties
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(party(2))));
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_create().times(0);

        let err = service(wallets, parties, transactions)
            .create(user(1), &draft)
            .await
            .expect_err("foreign party must fail");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn update_checks_the_transaction_before_its_references(draft: TransactionDraft) {
        let mut wallets = MockWalletRepository::new();
        wallets.expect_find_by_id().times(0);
        let foreign = recorded(&draft, 7);
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(foreign)));
        transactions.expect_update().times(0);

        let err = service(wallets, MockPartyRepository::new(), transactions)
            .update(user(1), TransactionId::new(40).expect("id"), &draft)
            .await
            .expect_err("foreign transaction must fail");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn missing_transactions_are_not_found() {
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let err = service(
            MockWalletRepository::new(),
            MockPartyRepository::new(),
            transactions,
        )
        .get(user(1), TransactionId::new(99).expect("id"))
        .await
        .expect_err("missing transaction must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
