//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. Handler tests substitute the generated mock instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue a session token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}
