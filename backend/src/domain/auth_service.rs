//! Sign-up and login orchestration.
//!
//! The service implements both driving ports on top of three driven ports:
//! the user repository, the password hasher and the token service. Inputs
//! arrive already validated ([`SignUpRequest`], [`LoginCredentials`]), so the
//! flow here is limited to hashing, storage and token issuance.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, SignUpService, TokenService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, IssuedToken, LoginCredentials, NewUser, SignUpRequest, User};

/// Authentication service implementing sign-up and login.
#[derive(Clone)]
pub struct AuthService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenService>,
}

impl<U, H> AuthService<U, H> {
    /// Create a service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message }
            | UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::UniqueViolation { message } => {
                Error::internal(format!("unexpected user uniqueness failure: {message}"))
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("credential processing failed: {error}"))
    }

    fn email_conflict() -> Error {
        Error::conflict("an account with this email already exists").with_details(json!({
            "field": "email",
            "code": "email_conflict",
        }))
    }
}

#[async_trait]
impl<U, H> SignUpService for AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, request: &SignUpRequest) -> Result<User, Error> {
        let credential = self
            .hasher
            .create_credential(request.password())
            .await
            .map_err(Self::map_hash_error)?;

        let new_user = NewUser {
            first_name: request.first_name().to_owned(),
            last_name: request.last_name().to_owned(),
            email: request.email().clone(),
            credential,
        };

        match self.users.create(&new_user).await {
            Ok(user) => {
                info!(user_id = user.id().get(), "user registered");
                Ok(user)
            }
            Err(UserPersistenceError::UniqueViolation { .. }) => {
                debug!("sign-up rejected: email already registered");
                Err(Self::email_conflict())
            }
            Err(error) => Err(Self::map_user_error(error)),
        }
    }
}

#[async_trait]
impl<U, H> LoginService for AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| {
                Error::not_found("no account exists for this email").with_details(json!({
                    "field": "email",
                    "code": "non_existent_user",
                }))
            })?;

        let matches = self
            .hasher
            .verify(credentials.password(), &account.credential)
            .await
            .map_err(Self::map_hash_error)?;
        if !matches {
            warn!(user_id = account.user.id().get(), "login rejected: wrong password");
            return Err(Error::unauthorized("wrong password").with_details(json!({
                "field": "password",
                "code": "wrong_password",
            })));
        }

        let issued = self
            .tokens
            .create_token(account.user.id(), account.user.email().as_ref())
            .map_err(|error| Error::internal(format!("token issuance failed: {error}")))?;
        info!(user_id = account.user.id().get(), "login succeeded");
        Ok(issued)
    }
}
