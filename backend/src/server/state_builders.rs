//! Builders wiring domain services to either PostgreSQL or in-memory
//! adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use expense_backend::domain::ports::{PasswordHasher, TokenService, UserRepository};
use expense_backend::domain::{
    AuthService, JwtTokenService, LedgerRepositories, PartyLedgerService, ScryptPasswordHasher,
    TransactionLedgerService, WalletLedgerService,
};
use expense_backend::inbound::http::state::{HttpState, HttpStatePorts};
use expense_backend::outbound::memory::InMemoryStore;
use expense_backend::outbound::persistence::{
    DbPool, DieselPartyRepository, DieselTransactionRepository, DieselUserRepository,
    DieselWalletRepository,
};

use super::ServerConfig;

fn diesel_ledger(pool: &DbPool) -> LedgerRepositories {
    LedgerRepositories {
        wallets: Arc::new(DieselWalletRepository::new(pool.clone())),
        parties: Arc::new(DieselPartyRepository::new(pool.clone())),
        transactions: Arc::new(DieselTransactionRepository::new(pool.clone())),
    }
}

fn assemble<U, H>(
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenService>,
    repos: LedgerRepositories,
) -> HttpState
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let auth = Arc::new(AuthService::new(users, hasher, tokens.clone()));
    HttpState::new(HttpStatePorts {
        login: auth.clone(),
        sign_up: auth,
        tokens,
        wallets: Arc::new(WalletLedgerService::new(repos.clone())),
        parties: Arc::new(PartyLedgerService::new(repos.clone())),
        transactions: Arc::new(TransactionLedgerService::new(repos)),
    })
}

/// Build handler state from the server configuration.
///
/// A configured pool selects the Diesel repositories; otherwise every port is
/// served by one shared [`InMemoryStore`].
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &config.token_settings,
        Arc::new(DefaultClock),
    ));
    let hasher = Arc::new(ScryptPasswordHasher);

    let state = match &config.db_pool {
        Some(pool) => assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            hasher,
            tokens,
            diesel_ledger(pool),
        ),
        None => {
            let store = Arc::new(InMemoryStore::default());
            assemble(
                store.clone(),
                hasher,
                tokens,
                LedgerRepositories::from_store(store),
            )
        }
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use expense_backend::domain::TokenSettings;
    use expense_backend::domain::{LoginCredentials, SignUpRequest, UserId};
    use zeroize::Zeroizing;

    fn config() -> ServerConfig {
        let settings = TokenSettings::new(
            Zeroizing::new(vec![7; 32]),
            "expense-backend-test",
            Duration::hours(1),
        );
        ServerConfig::new("127.0.0.1:0".parse().expect("socket address"), settings)
    }

    #[actix_rt::test]
    async fn without_a_pool_state_is_backed_by_memory() {
        let state = build_http_state(&config());
        let request =
            SignUpRequest::try_from_parts("Ada", "Lovelace", "ada@example.com", "Secret!123A")
                .expect("valid sign-up");

        let user = state.sign_up.sign_up(&request).await.expect("sign up");
        let wallets = state.wallets.list(user.id()).await.expect("list");

        assert!(wallets.is_empty());
        assert_eq!(user.id(), UserId::new(1).expect("id"));
    }

    #[actix_rt::test]
    async fn issued_tokens_validate_against_the_same_state() {
        let state = build_http_state(&config());
        let email = "grace@example.com";
        let request = SignUpRequest::try_from_parts("Grace", "Hopper", email, "Secret!123A")
            .expect("valid sign-up");
        state.sign_up.sign_up(&request).await.expect("sign up");

        let credentials =
            LoginCredentials::try_from_parts(email, "Secret!123A").expect("credentials");
        let issued = state.login.login(&credentials).await.expect("login");
        let claims = state
            .tokens
            .validate_token(&issued.token)
            .expect("valid token");

        assert_eq!(claims.email, email);
    }
}
