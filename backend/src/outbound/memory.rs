//! Process-local storage adapter.
//!
//! [`InMemoryStore`] implements every repository port over a single mutex so
//! the server can run without PostgreSQL and tests can exercise services end
//! to end. It enforces the same constraints as the database schema: unique
//! emails, unique `(user_id, name)` per wallet and party, and cascading
//! deletes from wallets and parties to their transactions.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    LedgerPersistenceError, PartyRepository, TransactionRepository, UserPersistenceError,
    UserRepository, WalletRepository,
};
use crate::domain::{
    Credential, NewParty, NewUser, NewWallet, Party, PartyId, ResourceName, Transaction,
    TransactionDraft, TransactionId, User, UserAccount, UserId, Wallet, WalletId,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, (User, Credential)>,
    wallets: BTreeMap<i64, Wallet>,
    parties: BTreeMap<i64, Party>,
    transactions: BTreeMap<i64, Transaction>,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// All four repositories backed by ordered maps behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    fn ledger(&self) -> Result<MutexGuard<'_, Tables>, LedgerPersistenceError> {
        self.tables
            .lock()
            .map_err(|_| LedgerPersistenceError::query(POISONED))
    }

    fn users(&self) -> Result<MutexGuard<'_, Tables>, UserPersistenceError> {
        self.tables
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))
    }
}

fn name_taken<'a, I>(mut rows: I, user_id: UserId, name: &ResourceName, except: Option<i64>) -> bool
where
    I: Iterator<Item = (i64, UserId, &'a ResourceName)>,
{
    rows.any(|(id, owner, existing)| {
        owner == user_id && existing == name && Some(id) != except
    })
}

fn from_draft(id: TransactionId, user_id: UserId, draft: &TransactionDraft) -> Transaction {
    Transaction {
        id,
        user_id,
        wallet_id: draft.wallet_id,
        party_id: draft.party_id,
        amount: draft.amount,
        description: draft.description.clone(),
        occurred_at: draft.occurred_at,
    }
}

fn assign<T>(raw: i64) -> Result<T, LedgerPersistenceError>
where
    T: TryFrom<i64>,
{
    T::try_from(raw).map_err(|_| LedgerPersistenceError::query("id sequence overflowed"))
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.users()?;
        if tables
            .users
            .values()
            .any(|(existing, _)| existing.email() == &user.email)
        {
            return Err(UserPersistenceError::unique_violation(user.email.as_ref()));
        }
        let raw = tables.allocate();
        let id = UserId::new(raw)
            .map_err(|_| UserPersistenceError::query("id sequence overflowed"))?;
        let created = User::new(id, &user.first_name, &user.last_name, user.email.clone());
        tables.users.insert(raw, (created.clone(), user.credential));
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let tables = self.users()?;
        Ok(tables
            .users
            .values()
            .find(|(user, _)| user.email().as_ref() == email)
            .map(|(user, credential)| UserAccount {
                user: user.clone(),
                credential: *credential,
            }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.users()?;
        Ok(tables.users.get(&id.get()).map(|(user, _)| user.clone()))
    }
}

#[async_trait]
impl WalletRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Wallet>, LedgerPersistenceError> {
        let tables = self.ledger()?;
        Ok(tables
            .wallets
            .values()
            .filter(|wallet| wallet.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: WalletId) -> Result<Option<Wallet>, LedgerPersistenceError> {
        Ok(self.ledger()?.wallets.get(&id.get()).cloned())
    }

    async fn create(&self, wallet: &NewWallet) -> Result<Wallet, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let rows = tables.wallets.values().map(|w| (w.id.get(), w.user_id, &w.name));
        if name_taken(rows, wallet.user_id, &wallet.name, None) {
            return Err(LedgerPersistenceError::unique_violation(wallet.name.as_ref()));
        }
        let raw = tables.allocate();
        let created = Wallet {
            id: assign(raw)?,
            user_id: wallet.user_id,
            name: wallet.name.clone(),
        };
        tables.wallets.insert(raw, created.clone());
        Ok(created)
    }

    async fn rename(
        &self,
        user_id: UserId,
        id: WalletId,
        name: &ResourceName,
    ) -> Result<Option<Wallet>, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let rows = tables.wallets.values().map(|w| (w.id.get(), w.user_id, &w.name));
        if name_taken(rows, user_id, name, Some(id.get())) {
            return Err(LedgerPersistenceError::unique_violation(name.as_ref()));
        }
        Ok(tables
            .wallets
            .get_mut(&id.get())
            .filter(|wallet| wallet.user_id == user_id)
            .map(|wallet| {
                wallet.name = name.clone();
                wallet.clone()
            }))
    }

    async fn delete(&self, user_id: UserId, id: WalletId) -> Result<bool, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let owned = tables
            .wallets
            .get(&id.get())
            .is_some_and(|wallet| wallet.user_id == user_id);
        if owned {
            tables.wallets.remove(&id.get());
            tables.transactions.retain(|_, tx| tx.wallet_id != id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl PartyRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Party>, LedgerPersistenceError> {
        let tables = self.ledger()?;
        Ok(tables
            .parties
            .values()
            .filter(|party| party.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: PartyId) -> Result<Option<Party>, LedgerPersistenceError> {
        Ok(self.ledger()?.parties.get(&id.get()).cloned())
    }

    async fn create(&self, party: &NewParty) -> Result<Party, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let rows = tables.parties.values().map(|p| (p.id.get(), p.user_id, &p.name));
        if name_taken(rows, party.user_id, &party.name, None) {
            return Err(LedgerPersistenceError::unique_violation(party.name.as_ref()));
        }
        let raw = tables.allocate();
        let created = Party {
            id: assign(raw)?,
            user_id: party.user_id,
            name: party.name.clone(),
        };
        tables.parties.insert(raw, created.clone());
        Ok(created)
    }

    async fn rename(
        &self,
        user_id: UserId,
        id: PartyId,
        name: &ResourceName,
    ) -> Result<Option<Party>, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let rows = tables.parties.values().map(|p| (p.id.get(), p.user_id, &p.name));
        if name_taken(rows, user_id, name, Some(id.get())) {
            return Err(LedgerPersistenceError::unique_violation(name.as_ref()));
        }
        Ok(tables
            .parties
            .get_mut(&id.get())
            .filter(|party| party.user_id == user_id)
            .map(|party| {
                party.name = name.clone();
                party.clone()
            }))
    }

    async fn delete(&self, user_id: UserId, id: PartyId) -> Result<bool, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let owned = tables
            .parties
            .get(&id.get())
            .is_some_and(|party| party.user_id == user_id);
        if owned {
            tables.parties.remove(&id.get());
            tables.transactions.retain(|_, tx| tx.party_id != id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl TransactionRepository for InMemoryStore {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Transaction>, LedgerPersistenceError> {
        let tables = self.ledger()?;
        let mut rows: Vec<Transaction> = tables
            .transactions
            .values()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerPersistenceError> {
        Ok(self.ledger()?.transactions.get(&id.get()).cloned())
    }

    async fn create(
        &self,
        user_id: UserId,
        draft: &TransactionDraft,
    ) -> Result<Transaction, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        if !tables.wallets.contains_key(&draft.wallet_id.get())
            || !tables.parties.contains_key(&draft.party_id.get())
        {
            return Err(LedgerPersistenceError::query(
                "transaction references a missing wallet or party",
            ));
        }
        let raw = tables.allocate();
        let created = from_draft(assign(raw)?, user_id, draft);
        tables.transactions.insert(raw, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Option<Transaction>, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        Ok(tables
            .transactions
            .get_mut(&id.get())
            .filter(|tx| tx.user_id == user_id)
            .map(|tx| {
                *tx = from_draft(id, user_id, draft);
                tx.clone()
            }))
    }

    async fn delete(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<bool, LedgerPersistenceError> {
        let mut tables = self.ledger()?;
        let owned = tables
            .transactions
            .get(&id.get())
            .is_some_and(|tx| tx.user_id == user_id);
        if owned {
            tables.transactions.remove(&id.get());
        }
        Ok(owned)
    }
}
