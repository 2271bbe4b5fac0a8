//! Wallets: named accounts money moves in and out of.

use serde::Serialize;

use super::{ResourceName, UserId, WalletId};

/// A wallet owned by exactly one user.
///
/// `user_id` is fixed at creation; responses serialise without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: WalletId,
    #[serde(skip)]
    pub user_id: UserId,
    pub name: ResourceName,
}

/// Data required to create a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWallet {
    pub user_id: UserId,
    pub name: ResourceName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialised_wallets_omit_owner() {
        let wallet = Wallet {
            id: WalletId::new(3).expect("id"),
            user_id: UserId::new(9).expect("id"),
            name: ResourceName::new("cash").expect("name"),
        };
        let value = serde_json::to_value(&wallet).expect("serialises");
        assert_eq!(value, serde_json::json!({"id": 3, "name": "cash"}));
    }
}
