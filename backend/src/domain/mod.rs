//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities used by the HTTP and
//! persistence layers, plus the services that orchestrate them. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload and stable codes.
//! - TraceId: request-scoped correlation identifier.
//! - UserId, WalletId, PartyId, TransactionId: positive integer identifiers.
//! - Password helpers: scrypt credentials and the strength policy.
//! - Token helpers: HS256 session tokens carrying identity claims.
//! - OwnershipValidator: the per-resource tenant check.
//! - AuthService and the ledger services implementing the driving ports.

pub mod auth;
pub mod auth_service;
pub mod error;
mod ledger_support;
pub mod ownership;
pub mod party;
pub mod party_service;
pub mod password;
pub mod ports;
pub mod resource;
pub mod token;
pub mod trace_id;
pub mod transaction;
pub mod transaction_service;
pub mod user;
pub mod wallet;
pub mod wallet_service;

pub use self::auth::{
    LoginCredentials, LoginValidationError, SignUpRequest, SignUpValidationError,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ledger_support::LedgerRepositories;
pub use self::ownership::{OwnershipError, OwnershipValidator};
pub use self::party::{NewParty, Party};
pub use self::party_service::PartyLedgerService;
pub use self::password::{
    create_credential, generate_salt, hash_password, validate_password_strength, verify_password,
    Credential, Password, PasswordHash, PasswordPolicyError, Salt, ScryptPasswordHasher,
    HASH_LEN, PASSWORD_MIN_LEN, SALT_LEN, SPECIAL_CHARACTERS,
};
pub use self::resource::{
    PartyId, ResourceIdError, ResourceKind, ResourceName, ResourceNameError, TransactionId,
    UserId, WalletId, RESOURCE_NAME_MAX,
};
pub use self::token::{
    IdentityClaims, IssuedToken, JwtTokenService, TokenSettings, DEFAULT_TOKEN_ISSUER,
    DEFAULT_TOKEN_TTL_SECS,
};
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};
pub use self::transaction::{
    Transaction, TransactionDraft, TransactionValidationError, DESCRIPTION_MAX,
};
pub use self::transaction_service::TransactionLedgerService;
pub use self::user::{
    normalize_email, EmailAddress, EmailValidationError, NewUser, User, UserAccount, EMAIL_MAX,
    EMAIL_MIN,
};
pub use self::wallet::{NewWallet, Wallet};
pub use self::wallet_service::WalletLedgerService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use expense_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
