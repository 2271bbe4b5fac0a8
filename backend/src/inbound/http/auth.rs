//! Bearer gate for protected endpoints.
//!
//! Handlers that take an [`AuthenticatedUser`] argument only run once the
//! `Authorization` header has been parsed and its token validated by the
//! configured [`TokenService`](crate::domain::ports::TokenService). The
//! extractor never touches storage.

use actix_web::http::header::{HeaderValue, AUTHORIZATION};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, taken from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

fn unauthorized(code: &str, message: &str) -> Error {
    Error::unauthorized(message).with_details(json!({ "code": code }))
}

fn malformed() -> Error {
    unauthorized(
        TokenError::malformed_token().code(),
        "authorization header must be `Bearer <token>`",
    )
}

/// Extract the token from an `Authorization` header value.
///
/// The header must hold exactly one `Bearer ` prefix followed by a non-empty
/// token.
pub(crate) fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, Error> {
    let raw = header
        .ok_or_else(malformed)?
        .to_str()
        .map_err(|_| malformed())?;
    if raw.matches(BEARER_PREFIX).count() != 1 {
        return Err(malformed());
    }
    let token = raw.strip_prefix(BEARER_PREFIX).ok_or_else(malformed)?.trim();
    if token.is_empty() {
        return Err(malformed());
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let token = bearer_token(req.headers().get(AUTHORIZATION))?;
    let claims = state.tokens.validate_token(token).map_err(|error| {
        debug!(code = error.code(), "bearer token rejected");
        unauthorized(error.code(), "invalid or expired token")
    })?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id,
        email: claims.email,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(actix_web::Error::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::fixture_state;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[rstest]
    #[case("Bearer abc", "abc")]
    #[case("Bearer   padded  ", "padded")]
    fn well_formed_headers_yield_the_token(#[case] raw: &str, #[case] expected: &str) {
        let header = HeaderValue::from_str(raw).expect("valid header");
        assert_eq!(bearer_token(Some(&header)).expect("token"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("Bearer ")]
    #[case("Bearer    ")]
    #[case("bearer abc")]
    #[case("Basic abc")]
    #[case("Bearer Bearer abc")]
    #[case("Token Bearer abc")]
    fn malformed_headers_are_rejected(#[case] raw: &str) {
        let header = HeaderValue::from_str(raw).expect("valid header");
        let err = bearer_token(Some(&header)).expect_err("malformed header");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.details(), Some(&json!({"code": "malformed_token"})));
    }

    #[test]
    fn missing_headers_are_malformed() {
        let err = bearer_token(None).expect_err("missing header");
        assert_eq!(err.details(), Some(&json!({"code": "malformed_token"})));
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id.to_string())
    }

    async fn call_whoami(header: Option<&str>) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        actix_test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn valid_tokens_reach_the_handler() {
        let res = call_whoami(Some("Bearer fixture:7:ada@example.com")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), b"7");
    }

    #[actix_web::test]
    async fn rejected_tokens_report_the_token_error_code() {
        let res = call_whoami(Some("Bearer fixture:0:ada@example.com")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.details(), Some(&json!({"code": "claims_invalid"})));
    }

    #[given("a request without an authorization header")]
    fn a_request_without_an_authorization_header() -> Option<&'static str> {
        None
    }

    #[when("the protected endpoint is called")]
    fn the_protected_endpoint_is_called(
        header: Option<&'static str>,
    ) -> actix_web::dev::ServiceResponse {
        actix_web::rt::System::new().block_on(call_whoami(header))
    }

    #[then("the response is 401")]
    fn the_response_is_401(res: &actix_web::dev::ServiceResponse) {
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    fn anonymous_requests_are_unauthorised() {
        let header = a_request_without_an_authorization_header();
        let res = the_protected_endpoint_is_called(header);
        the_response_is_401(&res);
    }
}
