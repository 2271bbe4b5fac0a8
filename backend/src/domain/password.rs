//! Password credentials: salt generation, scrypt derivation, constant-time
//! verification and the password-strength policy.
//!
//! The derivation parameters are fixed (`log2(N) = 14`, `r = 8`, `p = 1`,
//! 64-byte output); changing them invalidates every stored credential.
//! Plaintext passwords travel as [`Password`] so the bytes are wiped when
//! dropped.

use std::fmt;

use async_trait::async_trait;
use rand::RngCore;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::TraceId;
use super::ports::{PasswordHashError, PasswordHasher};

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;
/// Derived hash length in bytes.
pub const HASH_LEN: usize = 64;
/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 8;

const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>/?`~\\";

/// Plaintext password, wiped from memory on drop.
pub type Password = Zeroizing<String>;

/// Random per-credential salt.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Salt {
    type Error = PasswordHashError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; SALT_LEN] = value.try_into().map_err(|_| {
            PasswordHashError::malformed_credential(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                value.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(..)")
    }
}

/// Derived scrypt output.
#[derive(Clone, Copy)]
pub struct PasswordHash([u8; HASH_LEN]);

impl PasswordHash {
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for PasswordHash {
    type Error = PasswordHashError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; HASH_LEN] = value.try_into().map_err(|_| {
            PasswordHashError::malformed_credential(format!(
                "password hash must be {HASH_LEN} bytes, got {}",
                value.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl PartialEq for PasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for PasswordHash {}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Stored credential. `password_hash == scrypt(plaintext, salt)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credential {
    pub password_hash: PasswordHash,
    pub salt: Salt,
}

/// Draw a fresh salt from the operating system CSPRNG.
///
/// Entropy failures are reported, never retried or replaced with a weaker
/// source.
pub fn generate_salt() -> Result<Salt, PasswordHashError> {
    let mut bytes = [0_u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|error| PasswordHashError::entropy(error.to_string()))?;
    Ok(Salt(bytes))
}

/// Derive the scrypt hash of `plaintext` under `salt`.
///
/// Deterministic: the same inputs always yield the same bytes.
pub fn hash_password(plaintext: &str, salt: &Salt) -> Result<PasswordHash, PasswordHashError> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, HASH_LEN)
        .map_err(|error| PasswordHashError::derivation(error.to_string()))?;
    let mut output = [0_u8; HASH_LEN];
    scrypt::scrypt(plaintext.as_bytes(), &salt.0, &params, &mut output)
        .map_err(|error| PasswordHashError::derivation(error.to_string()))?;
    Ok(PasswordHash(output))
}

/// Re-derive and compare against `credential` in constant time.
pub fn verify_password(plaintext: &str, credential: &Credential) -> Result<bool, PasswordHashError> {
    let candidate = hash_password(plaintext, &credential.salt)?;
    Ok(candidate
        .0
        .as_slice()
        .ct_eq(credential.password_hash.0.as_slice())
        .into())
}

/// Salt and hash a plaintext in one step.
pub fn create_credential(plaintext: &str) -> Result<Credential, PasswordHashError> {
    let salt = generate_salt()?;
    let password_hash = hash_password(plaintext, &salt)?;
    Ok(Credential {
        password_hash,
        salt,
    })
}

/// Reasons a password fails the strength policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicyError {
    TooShort { min: usize },
    MissingSpecialCharacter,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
}

impl PasswordPolicyError {
    /// Stable code surfaced in error details.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::TooShort { .. } => "password_too_short",
            Self::MissingSpecialCharacter => "password_missing_special_character",
            Self::MissingLowercase => "password_missing_lowercase",
            Self::MissingUppercase => "password_missing_uppercase",
            Self::MissingDigit => "password_missing_digit",
        }
    }
}

impl fmt::Display for PasswordPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
            Self::MissingSpecialCharacter => {
                write!(f, "password must contain a special character")
            }
            Self::MissingLowercase => write!(f, "password must contain a lowercase letter"),
            Self::MissingUppercase => write!(f, "password must contain an uppercase letter"),
            Self::MissingDigit => write!(f, "password must contain a digit"),
        }
    }
}

impl std::error::Error for PasswordPolicyError {}

/// Check a candidate password against the strength policy.
///
/// Rules run in a fixed order and the first failure is reported: length,
/// special character, lowercase, uppercase, digit.
///
/// # Examples
/// ```
/// use expense_backend::domain::{validate_password_strength, PasswordPolicyError};
///
/// assert!(validate_password_strength("1Whateve!").is_ok());
/// assert_eq!(
///     validate_password_strength("123Whatever"),
///     Err(PasswordPolicyError::MissingSpecialCharacter)
/// );
/// ```
pub fn validate_password_strength(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(PasswordPolicyError::TooShort {
            min: PASSWORD_MIN_LEN,
        });
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(PasswordPolicyError::MissingSpecialCharacter);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    Ok(())
}

/// Production [`PasswordHasher`] backed by scrypt.
///
/// Derivation is CPU-bound, so both operations run on Tokio's blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScryptPasswordHasher;

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::sync_scope(trace_id, work))
        .await
        .map_err(|error| PasswordHashError::derivation(format!("hashing task failed: {error}")))?
}

#[async_trait]
impl PasswordHasher for ScryptPasswordHasher {
    async fn create_credential(&self, password: &Password) -> Result<Credential, PasswordHashError> {
        let plaintext = password.clone();
        run_blocking(move || create_credential(plaintext.as_str())).await
    }

    async fn verify(
        &self,
        password: &Password,
        credential: &Credential,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = password.clone();
        let credential = *credential;
        run_blocking(move || verify_password(plaintext.as_str(), &credential)).await
    }
}
