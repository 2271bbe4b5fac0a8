//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, SignUpRequest, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignUpService: Send + Sync {
    /// Register a new user. No token is issued; clients log in afterwards.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<User, Error>;
}
