//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, tokens) are implemented by outbound
//! adapters; driving ports (login, sign-up, resource services) are called by
//! inbound adapters.

mod macros;
pub(crate) use macros::port_error;

mod ledger_persistence_error;
mod login_service;
mod party_repository;
mod party_service;
mod password_hasher;
mod sign_up_service;
mod token_service;
mod transaction_repository;
mod transaction_service;
mod user_repository;
mod wallet_repository;
mod wallet_service;

pub use ledger_persistence_error::LedgerPersistenceError;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use party_repository::MockPartyRepository;
pub use party_repository::PartyRepository;
#[cfg(test)]
pub use party_service::MockPartyService;
pub use party_service::PartyService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use sign_up_service::MockSignUpService;
pub use sign_up_service::SignUpService;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenError, TokenService};
#[cfg(test)]
pub use transaction_repository::MockTransactionRepository;
pub use transaction_repository::TransactionRepository;
#[cfg(test)]
pub use transaction_service::MockTransactionService;
pub use transaction_service::TransactionService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use wallet_repository::MockWalletRepository;
pub use wallet_repository::WalletRepository;
#[cfg(test)]
pub use wallet_service::MockWalletService;
pub use wallet_service::WalletService;
