//! Signed session tokens.
//!
//! Tokens are compact HS256 JWTs over [`IdentityClaims`]. The signing secret,
//! issuer and lifetime are fixed at construction through [`TokenSettings`];
//! the clock is injected so expiry can be exercised deterministically.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::ports::{TokenError, TokenService};
use super::UserId;

/// Default issuer embedded in and required of every token.
pub const DEFAULT_TOKEN_ISSUER: &str = "expense-backend";
/// Default token lifetime: one year.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 31_536_000;

/// Identity carried by a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub user_id: UserId,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Freshly signed token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Immutable signing configuration.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    issuer: String,
    ttl: Duration,
}

impl TokenSettings {
    /// Bundle a secret with issuer and lifetime.
    pub fn new(secret: Zeroizing<Vec<u8>>, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl,
        }
    }

    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Short SHA-256 fingerprint of the secret, safe to log.
    ///
    /// # Examples
    /// ```
    /// use chrono::Duration;
    /// use expense_backend::domain::TokenSettings;
    /// use zeroize::Zeroizing;
    ///
    /// let settings = TokenSettings::new(
    ///     Zeroizing::new(b"secret".to_vec()),
    ///     "issuer",
    ///     Duration::hours(1),
    /// );
    /// assert_eq!(settings.fingerprint().len(), 16);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.secret.as_slice());
        hex::encode(digest.get(..8).unwrap_or_default())
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Wire form of the claims. Everything except `exp` is optional on decode so
/// an expired token reports expiry before any other claim problem.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    exp: i64,
}

/// HS256 JWT implementation of [`TokenService`].
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build the service from settings and a clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use chrono::Duration;
    /// use expense_backend::domain::ports::TokenService;
    /// use expense_backend::domain::{JwtTokenService, TokenSettings, UserId};
    /// use mockable::DefaultClock;
    /// use zeroize::Zeroizing;
    ///
    /// let settings = TokenSettings::new(
    ///     Zeroizing::new(b"0123456789abcdef0123456789abcdef".to_vec()),
    ///     "expense-backend",
    ///     Duration::hours(1),
    /// );
    /// let tokens = JwtTokenService::new(&settings, Arc::new(DefaultClock));
    /// let issued = tokens
    ///     .create_token(UserId::new(1).expect("id"), "ada@example.com")
    ///     .expect("signing succeeds");
    /// let claims = tokens.validate_token(&issued.token).expect("valid token");
    /// assert_eq!(claims.user_id.get(), 1);
    /// ```
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_slice()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_slice()),
            issuer: settings.issuer.clone(),
            ttl: settings.ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry and issuer are checked against the injected clock below.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims::<&str>(&[]);
        validation
    }

    fn check_claims(&self, claims: JwtClaims) -> Result<IdentityClaims, TokenError> {
        // A token is still valid at exactly `exp`.
        if self.clock.utc().timestamp() > claims.exp {
            return Err(TokenError::expired());
        }
        if claims.iss.as_deref() != Some(self.issuer.as_str()) {
            return Err(TokenError::claims_invalid("unexpected issuer"));
        }
        let raw_id = claims
            .user_id
            .ok_or_else(|| TokenError::claims_invalid("user_id is missing"))?;
        let user_id =
            UserId::new(raw_id).map_err(|error| TokenError::claims_invalid(error.to_string()))?;
        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| TokenError::claims_invalid("email is missing"))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::claims_invalid("exp is out of range"))?;
        let issued_at = match claims.iat {
            Some(iat) => DateTime::from_timestamp(iat, 0)
                .ok_or_else(|| TokenError::claims_invalid("iat is out of range"))?,
            None => expires_at - self.ttl,
        };

        Ok(IdentityClaims {
            user_id,
            email,
            issued_at,
            expires_at,
        })
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            TokenError::invalid_signature()
        }
        ErrorKind::ExpiredSignature => TokenError::expired(),
        ErrorKind::Json(_)
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature => TokenError::claims_invalid(error.to_string()),
        _ => TokenError::malformed_token(),
    }
}

impl TokenService for JwtTokenService {
    fn create_token(&self, user_id: UserId, email: &str) -> Result<IssuedToken, TokenError> {
        let now = self.clock.utc();
        let expires_at = now + self.ttl;
        let claims = JwtClaims {
            user_id: Some(user_id.get()),
            email: Some(email.to_owned()),
            iss: Some(self.issuer.clone()),
            iat: Some(now.timestamp()),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| TokenError::signing(error.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn validate_token(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        // Header failures are structural; anything after them concerns the
        // signature or the claims.
        jsonwebtoken::decode_header(token).map_err(|_| TokenError::malformed_token())?;
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|error| map_decode_error(&error))?;
        self.check_claims(data.claims)
    }
}

#[cfg(test)]
mod tests;
