//! Port for credential derivation and verification.
//!
//! Services depend on this trait rather than on scrypt directly so unit tests
//! can swap in a fast deterministic double.

use async_trait::async_trait;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::domain::password::{Credential, Password, PasswordHash, Salt, HASH_LEN, SALT_LEN};

use super::port_error;

port_error! {
    /// Failures raised while deriving or checking credentials.
    pub enum PasswordHashError {
        /// The operating system could not supply random bytes.
        Entropy { message: String } => "system entropy source unavailable: {message}",
        /// Key derivation failed.
        Derivation { message: String } => "password derivation failed: {message}",
        /// Stored credential bytes have the wrong shape.
        MalformedCredential { message: String } => "stored credential is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Generate a fresh salt and derive the hash of `password`.
    async fn create_credential(&self, password: &Password) -> Result<Credential, PasswordHashError>;

    /// Check `password` against a stored credential.
    async fn verify(
        &self,
        password: &Password,
        credential: &Credential,
    ) -> Result<bool, PasswordHashError>;
}

/// Fast deterministic hasher for tests.
///
/// Uses a fixed salt and SHA-512, so it must never back a real deployment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl FixturePasswordHasher {
    const SALT: [u8; SALT_LEN] = [7; SALT_LEN];

    fn digest(password: &str, salt: &Salt) -> PasswordHash {
        let mut hasher = Sha512::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        let mut bytes = [0_u8; HASH_LEN];
        bytes.copy_from_slice(&hasher.finalize());
        PasswordHash::from_bytes(bytes)
    }
}

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn create_credential(&self, password: &Password) -> Result<Credential, PasswordHashError> {
        let salt = Salt::from_bytes(Self::SALT);
        Ok(Credential {
            password_hash: Self::digest(password.as_str(), &salt),
            salt,
        })
    }

    async fn verify(
        &self,
        password: &Password,
        credential: &Credential,
    ) -> Result<bool, PasswordHashError> {
        let candidate = Self::digest(password.as_str(), &credential.salt);
        Ok(candidate
            .as_bytes()
            .as_slice()
            .ct_eq(credential.password_hash.as_bytes().as_slice())
            .into())
    }
}
