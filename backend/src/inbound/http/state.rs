//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, PartyService, SignUpService, TokenService, TransactionService, WalletService,
};

/// Dependency bundle for HTTP handlers.
///
/// `tokens` backs the bearer gate; the remaining ports are the use-cases the
/// handlers drive.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub sign_up: Arc<dyn SignUpService>,
    pub tokens: Arc<dyn TokenService>,
    pub wallets: Arc<dyn WalletService>,
    pub parties: Arc<dyn PartyService>,
    pub transactions: Arc<dyn TransactionService>,
}

/// Parameter object for [`HttpState::new`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub sign_up: Arc<dyn SignUpService>,
    pub tokens: Arc<dyn TokenService>,
    pub wallets: Arc<dyn WalletService>,
    pub parties: Arc<dyn PartyService>,
    pub transactions: Arc<dyn TransactionService>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use expense_backend::domain::ports::{FixturePasswordHasher, FixtureTokenService};
    /// use expense_backend::domain::{
    ///     AuthService, LedgerRepositories, PartyLedgerService, TransactionLedgerService,
    ///     WalletLedgerService,
    /// };
    /// use expense_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use expense_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let repos = LedgerRepositories::from_store(store.clone());
    /// let auth = Arc::new(AuthService::new(
    ///     store,
    ///     Arc::new(FixturePasswordHasher),
    ///     Arc::new(FixtureTokenService),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: auth.clone(),
    ///     sign_up: auth,
    ///     tokens: Arc::new(FixtureTokenService),
    ///     wallets: Arc::new(WalletLedgerService::new(repos.clone())),
    ///     parties: Arc::new(PartyLedgerService::new(repos.clone())),
    ///     transactions: Arc::new(TransactionLedgerService::new(repos)),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            sign_up,
            tokens,
            wallets,
            parties,
            transactions,
        } = ports;
        Self {
            login,
            sign_up,
            tokens,
            wallets,
            parties,
            transactions,
        }
    }
}
