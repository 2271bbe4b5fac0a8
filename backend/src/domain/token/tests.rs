//! Tests for JWT issuance and validation.

use super::*;
use chrono::{Local, TimeZone};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const SECRET: &[u8] = b"test-secret-test-secret-test-secret!";
const ISSUER: &str = "expense-backend-tests";

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn settings(secret: &[u8]) -> TokenSettings {
    TokenSettings::new(Zeroizing::new(secret.to_vec()), ISSUER, Duration::hours(1))
}

fn service_at(now: DateTime<Utc>) -> JwtTokenService {
    JwtTokenService::new(&settings(SECRET), Arc::new(FixtureClock { utc_now: now }))
}

fn user(id: i64) -> UserId {
    UserId::new(id).expect("positive fixture id")
}

fn sign_raw(claims: &serde_json::Value, secret: &[u8]) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .expect("raw signing succeeds")
}

#[rstest]
fn issue_then_validate_preserves_identity(issued_at: DateTime<Utc>) {
    let service = service_at(issued_at);
    let issued = service
        .create_token(user(7), "ada@example.com")
        .expect("signing succeeds");
    assert_eq!(issued.expires_at, issued_at + Duration::hours(1));

    let claims = service.validate_token(&issued.token).expect("token is valid");
    assert_eq!(claims.user_id, user(7));
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.issued_at, issued_at);
    assert_eq!(claims.expires_at, issued.expires_at);
}

#[rstest]
#[case(Duration::hours(1) + Duration::seconds(1))]
#[case(Duration::days(400))]
fn tokens_past_expiry_are_expired(issued_at: DateTime<Utc>, #[case] elapsed: Duration) {
    let token = service_at(issued_at)
        .create_token(user(1), "ada@example.com")
        .expect("signing succeeds")
        .token;

    let err = service_at(issued_at + elapsed)
        .validate_token(&token)
        .expect_err("expired token must fail");
    assert_eq!(err, TokenError::expired());
}

#[rstest]
#[case(Duration::hours(1) - Duration::seconds(1))]
#[case(Duration::hours(1))]
fn tokens_up_to_their_expiry_instant_are_accepted(
    issued_at: DateTime<Utc>,
    #[case] elapsed: Duration,
) {
    let token = service_at(issued_at)
        .create_token(user(1), "ada@example.com")
        .expect("signing succeeds")
        .token;

    let claims = service_at(issued_at + elapsed)
        .validate_token(&token)
        .expect("token is still valid");
    assert_eq!(claims.expires_at, issued_at + Duration::hours(1));
}

#[rstest]
fn expired_tokens_report_expiry_before_other_claim_problems(issued_at: DateTime<Utc>) {
    let token = sign_raw(
        &json!({
            "user_id": 0,
            "iss": "someone-else",
            "exp": (issued_at - Duration::seconds(5)).timestamp(),
        }),
        SECRET,
    );

    let err = service_at(issued_at)
        .validate_token(&token)
        .expect_err("expired token must fail");
    assert_eq!(err, TokenError::expired());
}

#[rstest]
fn tokens_signed_with_another_secret_are_rejected(issued_at: DateTime<Utc>) {
    let foreign = JwtTokenService::new(
        &settings(b"another-secret-another-secret-!!"),
        Arc::new(FixtureClock { utc_now: issued_at }),
    );
    let token = foreign
        .create_token(user(1), "ada@example.com")
        .expect("signing succeeds")
        .token;

    let err = service_at(issued_at)
        .validate_token(&token)
        .expect_err("foreign signature must fail");
    assert_eq!(err, TokenError::invalid_signature());
}

#[rstest]
fn tampered_payloads_fail_signature_checks(issued_at: DateTime<Utc>) {
    let service = service_at(issued_at);
    let token = service
        .create_token(user(1), "ada@example.com")
        .expect("signing succeeds")
        .token;
    let forged = service
        .create_token(user(2), "eve@example.com")
        .expect("signing succeeds")
        .token;

    let mut parts: Vec<&str> = token.split('.').collect();
    let forged_payload = forged.split('.').nth(1).expect("payload segment");
    parts[1] = forged_payload;
    let tampered = parts.join(".");

    let err = service
        .validate_token(&tampered)
        .expect_err("tampered token must fail");
    assert_eq!(err, TokenError::invalid_signature());
}

#[rstest]
#[case("")]
#[case("not-a-token")]
#[case("a.b")]
#[case("a.b.c")]
#[case("!!!.???.###")]
fn structurally_broken_tokens_are_malformed(issued_at: DateTime<Utc>, #[case] token: &str) {
    let err = service_at(issued_at)
        .validate_token(token)
        .expect_err("broken token must fail");
    assert_eq!(err, TokenError::malformed_token());
}

#[rstest]
#[case(json!({"user_id": 0, "email": "a@b.c", "iss": ISSUER}))]
#[case(json!({"user_id": -4, "email": "a@b.c", "iss": ISSUER}))]
#[case(json!({"email": "a@b.c", "iss": ISSUER}))]
#[case(json!({"user_id": 3, "iss": ISSUER}))]
#[case(json!({"user_id": 3, "email": "a@b.c", "iss": "someone-else"}))]
#[case(json!({"user_id": 3, "email": "a@b.c"}))]
fn signed_tokens_with_bad_claims_are_claims_invalid(
    issued_at: DateTime<Utc>,
    #[case] claims: serde_json::Value,
) {
    let mut claims = claims;
    claims["exp"] = json!((issued_at + Duration::minutes(5)).timestamp());
    let token = sign_raw(&claims, SECRET);

    let err = service_at(issued_at)
        .validate_token(&token)
        .expect_err("bad claims must fail");
    assert!(matches!(err, TokenError::ClaimsInvalid { .. }), "{err:?}");
}

#[rstest]
fn signed_tokens_without_expiry_are_claims_invalid(issued_at: DateTime<Utc>) {
    let token = sign_raw(
        &json!({"user_id": 3, "email": "a@b.c", "iss": ISSUER}),
        SECRET,
    );
    let err = service_at(issued_at)
        .validate_token(&token)
        .expect_err("missing exp must fail");
    assert!(matches!(err, TokenError::ClaimsInvalid { .. }), "{err:?}");
}

#[test]
fn settings_debug_redacts_secret() {
    let rendered = format!("{:?}", settings(SECRET));
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("test-secret"));
}

#[test]
fn fingerprint_is_stable_and_secret_dependent() {
    let first = settings(SECRET).fingerprint();
    assert_eq!(first, settings(SECRET).fingerprint());
    assert_ne!(first, settings(b"different").fingerprint());
}

#[given("a one hour token whose expiry passed a second ago")]
fn a_token_past_its_expiry(issued_at: DateTime<Utc>) -> (String, DateTime<Utc>) {
    let token = service_at(issued_at)
        .create_token(user(9), "grace@example.com")
        .expect("signing succeeds")
        .token;
    (token, issued_at + Duration::hours(1) + Duration::seconds(1))
}

#[when("the token is validated now")]
fn the_token_is_validated_now(
    fixture: (String, DateTime<Utc>),
) -> Result<IdentityClaims, TokenError> {
    let (token, now) = fixture;
    service_at(now).validate_token(&token)
}

#[then("validation fails because the token expired")]
fn validation_fails_because_the_token_expired(result: Result<IdentityClaims, TokenError>) {
    assert_eq!(result, Err(TokenError::expired()));
}

#[rstest]
fn a_token_past_its_expiry_is_expired(issued_at: DateTime<Utc>) {
    let fixture = a_token_past_its_expiry(issued_at);
    let result = the_token_is_validated_now(fixture);
    validation_fails_because_the_token_expired(result);
}
