//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Reading a row re-validates it into the
//! matching domain type so a corrupt row surfaces as a query error instead of
//! an invalid value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Credential, EmailAddress, Party, PartyId, PasswordHash, ResourceName, Salt, Transaction,
    TransactionId, User, UserAccount, UserId, Wallet, WalletId,
};

use super::schema::{parties, transactions, users, wallets};

/// A stored row failed domain validation.
#[derive(Debug, thiserror::Error)]
#[error("invalid {table} row {id}: {reason}")]
pub(crate) struct InvalidRow {
    table: &'static str,
    id: i64,
    reason: String,
}

impl InvalidRow {
    fn new(table: &'static str, id: i64, reason: impl ToString) -> Self {
        Self {
            table,
            id,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: Vec<u8>,
    pub salt: Vec<u8>,
}

impl UserRow {
    fn user(&self) -> Result<User, InvalidRow> {
        let id = UserId::new(self.id).map_err(|err| InvalidRow::new("users", self.id, err))?;
        let email =
            EmailAddress::new(&self.email).map_err(|err| InvalidRow::new("users", self.id, err))?;
        Ok(User::new(id, &self.first_name, &self.last_name, email))
    }

    pub(crate) fn into_user(self) -> Result<User, InvalidRow> {
        self.user()
    }

    pub(crate) fn into_account(self) -> Result<UserAccount, InvalidRow> {
        let user = self.user()?;
        let password_hash = PasswordHash::try_from(self.password_hash.as_slice())
            .map_err(|err| InvalidRow::new("users", self.id, err))?;
        let salt = Salt::try_from(self.salt.as_slice())
            .map_err(|err| InvalidRow::new("users", self.id, err))?;
        Ok(UserAccount {
            user,
            credential: Credential {
                password_hash,
                salt,
            },
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a [u8],
    pub salt: &'a [u8],
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wallets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WalletRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

impl TryFrom<WalletRow> for Wallet {
    type Error = InvalidRow;

    fn try_from(row: WalletRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| InvalidRow::new("wallets", row.id, reason);
        Ok(Self {
            id: WalletId::new(row.id).map_err(|err| invalid(err.to_string()))?,
            user_id: UserId::new(row.user_id).map_err(|err| invalid(err.to_string()))?,
            name: ResourceName::new(&row.name).map_err(|err| invalid(err.to_string()))?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wallets)]
pub(crate) struct NewWalletRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PartyRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

impl TryFrom<PartyRow> for Party {
    type Error = InvalidRow;

    fn try_from(row: PartyRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| InvalidRow::new("parties", row.id, reason);
        Ok(Self {
            id: PartyId::new(row.id).map_err(|err| invalid(err.to_string()))?,
            user_id: UserId::new(row.user_id).map_err(|err| invalid(err.to_string()))?,
            name: ResourceName::new(&row.name).map_err(|err| invalid(err.to_string()))?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parties)]
pub(crate) struct NewPartyRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
    pub id: i64,
    pub user_id: i64,
    pub wallet_id: i64,
    pub party_id: i64,
    pub amount: i64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = InvalidRow;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| InvalidRow::new("transactions", row.id, reason);
        Ok(Self {
            id: TransactionId::new(row.id).map_err(|err| invalid(err.to_string()))?,
            user_id: UserId::new(row.user_id).map_err(|err| invalid(err.to_string()))?,
            wallet_id: WalletId::new(row.wallet_id).map_err(|err| invalid(err.to_string()))?,
            party_id: PartyId::new(row.party_id).map_err(|err| invalid(err.to_string()))?,
            amount: row.amount,
            description: row.description,
            occurred_at: row.occurred_at,
        })
    }
}

/// Insert and full-replace payload for transactions.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = transactions)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TransactionValues<'a> {
    pub user_id: i64,
    pub wallet_id: i64,
    pub party_id: i64,
    pub amount: i64,
    pub description: Option<&'a str>,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HASH_LEN, SALT_LEN};

    fn user_row() -> UserRow {
        UserRow {
            id: 4,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: vec![1; HASH_LEN],
            salt: vec![2; SALT_LEN],
        }
    }

    #[test]
    fn user_rows_become_accounts() {
        let account = user_row().into_account().expect("valid row");
        assert_eq!(account.user.id().get(), 4);
        assert_eq!(account.credential.salt, Salt::from_bytes([2; SALT_LEN]));
    }

    #[test]
    fn truncated_hashes_are_rejected() {
        let mut row = user_row();
        row.password_hash.truncate(10);
        let err = row.into_account().expect_err("short hash");
        assert!(err.to_string().starts_with("invalid users row 4"));
    }

    #[test]
    fn blank_wallet_names_are_rejected() {
        let row = WalletRow {
            id: 9,
            user_id: 1,
            name: "  ".to_owned(),
        };
        assert!(Wallet::try_from(row).is_err());
    }

    #[test]
    fn transaction_rows_keep_descriptions() {
        let row = TransactionRow {
            id: 1,
            user_id: 2,
            wallet_id: 3,
            party_id: 4,
            amount: -50,
            description: Some("Bus".to_owned()),
            occurred_at: Utc::now(),
        };
        let tx = Transaction::try_from(row).expect("valid row");
        assert_eq!(tx.description.as_deref(), Some("Bus"));
        assert_eq!(tx.party_id.get(), 4);
    }
}
