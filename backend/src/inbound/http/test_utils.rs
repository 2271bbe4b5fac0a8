//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{FixturePasswordHasher, FixtureTokenService};
use crate::domain::{
    AuthService, LedgerRepositories, PartyLedgerService, TransactionLedgerService,
    WalletLedgerService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// HTTP state over a fresh in-memory store with fast hashing and
/// `fixture:<id>:<email>` tokens.
pub fn fixture_state() -> HttpState {
    let store = Arc::new(InMemoryStore::default());
    let repos = LedgerRepositories::from_store(store.clone());
    let auth = Arc::new(AuthService::new(
        store,
        Arc::new(FixturePasswordHasher),
        Arc::new(FixtureTokenService),
    ));
    HttpState::new(HttpStatePorts {
        login: auth.clone(),
        sign_up: auth,
        tokens: Arc::new(FixtureTokenService),
        wallets: Arc::new(WalletLedgerService::new(repos.clone())),
        parties: Arc::new(PartyLedgerService::new(repos.clone())),
        transactions: Arc::new(TransactionLedgerService::new(repos)),
    })
}

/// `Authorization` header value accepted by [`FixtureTokenService`].
pub fn bearer_for(user_id: i64, email: &str) -> String {
    format!("Bearer fixture:{user_id}:{email}")
}
