//! Registration and login handlers.
//!
//! ```text
//! POST /auth/signup {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","password":"Str0ng!pw"}
//! POST /auth/login  {"email":"ada@example.com","password":"Str0ng!pw"}
//! ```

use std::fmt;

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginCredentials, SignUpRequest};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_error, sign_up_error};
use crate::inbound::http::ApiResult;

/// Sign-up request body for `POST /auth/signup`.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpBody {
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Login request body for `POST /auth/login`.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for SignUpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpBody")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for LoginBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginBody")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &REDACTED)
            .finish()
    }
}

/// Register a new account.
///
/// No token is issued; clients call `/auth/login` afterwards.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpBody,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request =
        SignUpRequest::try_from_parts(&body.first_name, &body.last_name, &body.email, &body.password)
            .map_err(|err| sign_up_error(&err))?;
    let user = state.sign_up.sign_up(&request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = ErrorSchema),
        (status = 401, description = "Wrong password", body = ErrorSchema),
        (status = 404, description = "Unknown email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| login_error(&err))?;
    let issued = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: issued.token,
    }))
}
