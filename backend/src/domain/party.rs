//! Parties: the counterparties a user pays or is paid by.

use serde::Serialize;

use super::{PartyId, ResourceName, UserId};

/// A party owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    #[serde(skip)]
    pub user_id: UserId,
    pub name: ResourceName,
}

/// Data required to create a party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParty {
    pub user_id: UserId,
    pub name: ResourceName,
}
