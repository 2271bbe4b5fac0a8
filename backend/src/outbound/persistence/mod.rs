//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and ledger repository ports, backed
//! by PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every database failure is mapped onto the port's error type.
//!
//! # Example
//!
//! ```ignore
//! use expense_backend::outbound::persistence::{DbPool, DieselWalletRepository, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/expenses")).await?;
//! let wallets = DieselWalletRepository::new(pool);
//! ```

mod diesel_party_repository;
mod diesel_transaction_repository;
mod diesel_user_repository;
mod diesel_wallet_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_party_repository::DieselPartyRepository;
pub use diesel_transaction_repository::DieselTransactionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_wallet_repository::DieselWalletRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
