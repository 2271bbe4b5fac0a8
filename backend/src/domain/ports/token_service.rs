//! Port for issuing and validating session tokens.
//!
//! The bearer gate depends on this trait only; the production JWT adapter
//! and the fixture double are interchangeable.

use chrono::{DateTime, Utc};

use crate::domain::{IdentityClaims, IssuedToken, UserId};

use super::port_error;

port_error! {
    /// Reasons a token cannot be issued or accepted.
    pub enum TokenError {
        /// Not a structurally valid token (segments, encoding, header).
        MalformedToken => "token is malformed",
        /// Signature does not match the configured secret.
        InvalidSignature => "token signature is invalid",
        /// The token's expiry time has passed.
        Expired => "token has expired",
        /// Signature is valid but the claims are unusable.
        ClaimsInvalid { message: String } => "token claims are invalid: {message}",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

impl TokenError {
    /// Stable code surfaced in `401` error details.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedToken => "malformed_token",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "token_expired",
            Self::ClaimsInvalid { .. } => "claims_invalid",
            Self::Signing { .. } => "token_signing_failed",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign claims for `user_id` and `email`, expiring after the configured
    /// lifetime.
    fn create_token(&self, user_id: UserId, email: &str) -> Result<IssuedToken, TokenError>;

    /// Verify signature, expiry and claims, returning the identity.
    fn validate_token(&self, token: &str) -> Result<IdentityClaims, TokenError>;
}

const FIXTURE_PREFIX: &str = "fixture";

/// Stateless token double producing `fixture:<id>:<email>` strings.
///
/// Tokens never expire and carry no signature, so this double is for tests
/// and local development only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

fn fixture_expiry() -> DateTime<Utc> {
    DateTime::<Utc>::MAX_UTC
}

impl TokenService for FixtureTokenService {
    fn create_token(&self, user_id: UserId, email: &str) -> Result<IssuedToken, TokenError> {
        Ok(IssuedToken {
            token: format!("{FIXTURE_PREFIX}:{user_id}:{email}"),
            expires_at: fixture_expiry(),
        })
    }

    fn validate_token(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let mut parts = token.splitn(3, ':');
        let (Some(FIXTURE_PREFIX), Some(raw_id), Some(email)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::malformed_token());
        };
        let user_id = raw_id
            .parse::<UserId>()
            .map_err(|error| TokenError::claims_invalid(error.to_string()))?;
        if email.trim().is_empty() {
            return Err(TokenError::claims_invalid("email must not be empty"));
        }
        Ok(IdentityClaims {
            user_id,
            email: email.to_owned(),
            issued_at: DateTime::<Utc>::MIN_UTC,
            expires_at: fixture_expiry(),
        })
    }
}
