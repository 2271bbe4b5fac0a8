//! Tests for transaction handlers and payload conversion.

use super::*;
use crate::domain::ports::MockTransactionService;
use crate::domain::{ErrorCode, UserId};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{bearer_for, fixture_state};
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, App};
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use std::sync::Arc;

fn sample_body() -> TransactionBody {
    TransactionBody {
        wallet_id: Some(1),
        party_id: Some(2),
        amount: Some(-1250),
        description: Some("Lunch".to_owned()),
        occurred_at: Some("2026-03-01T12:00:00Z".to_owned()),
    }
}

#[fixture]
fn body() -> TransactionBody {
    sample_body()
}

fn details(err: &Error) -> Value {
    err.details().cloned().unwrap_or(Value::Null)
}

#[rstest]
fn complete_bodies_become_drafts(body: TransactionBody) {
    let draft = TransactionDraft::try_from(body).expect("valid body");
    assert_eq!(draft.wallet_id.get(), 1);
    assert_eq!(draft.party_id.get(), 2);
    assert_eq!(draft.amount, -1250);
    assert_eq!(
        draft.occurred_at,
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("timestamp")
    );
}

#[rstest]
fn omitted_timestamps_default_to_now(mut body: TransactionBody) {
    body.occurred_at = None;
    let before = Utc::now();
    let draft = TransactionDraft::try_from(body).expect("valid body");
    assert!(draft.occurred_at >= before);
    assert!(draft.occurred_at <= Utc::now());
}

#[rstest]
#[case::no_wallet(|b: &mut TransactionBody| b.wallet_id = None, "walletId", "missing_field")]
#[case::zero_wallet(|b: &mut TransactionBody| b.wallet_id = Some(0), "walletId", "invalid_id")]
#[case::negative_party(|b: &mut TransactionBody| b.party_id = Some(-4), "partyId", "invalid_id")]
#[case::no_amount(|b: &mut TransactionBody| b.amount = None, "amount", "missing_field")]
#[case::zero_amount(|b: &mut TransactionBody| b.amount = Some(0), "amount", "zero_amount")]
#[case::bad_time(|b: &mut TransactionBody| b.occurred_at = Some("soon".into()), "occurredAt", "invalid_timestamp")]
fn invalid_bodies_name_the_field(
    mut body: TransactionBody,
    #[case] mutate: fn(&mut TransactionBody),
    #[case] field: &str,
    #[case] code: &str,
) {
    mutate(&mut body);
    let err = TransactionDraft::try_from(body).expect_err("invalid body");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(details(&err), json!({"field": field, "code": code}));
}

fn state_with(transactions: MockTransactionService) -> HttpState {
    let base = fixture_state();
    HttpState::new(HttpStatePorts {
        login: base.login,
        sign_up: base.sign_up,
        tokens: base.tokens,
        wallets: base.wallets,
        parties: base.parties,
        transactions: Arc::new(transactions),
    })
}

macro_rules! app_for {
    ($state:expr) => {
        actix_test::init_service(
            App::new().app_data(web::Data::new($state)).service(
                web::scope("/transactions")
                    .service(list_transactions)
                    .service(create_transaction)
                    .service(get_transaction)
                    .service(update_transaction)
                    .service(delete_transaction),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn created_transactions_serialise_camel_case() {
    let mut service = MockTransactionService::new();
    service
        .expect_create()
        .withf(|user, draft| user.get() == 9 && draft.amount == -1250)
        .times(1)
        .return_once(|user, draft| {
            Ok(Transaction {
                id: TransactionId::new(40).expect("id"),
                user_id: user,
                wallet_id: draft.wallet_id,
                party_id: draft.party_id,
                amount: draft.amount,
                description: draft.description.clone(),
                occurred_at: draft.occurred_at,
            })
        });
    let app = app_for!(state_with(service));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/transactions")
            .insert_header((AUTHORIZATION, bearer_for(9, "ada@example.com")))
            .set_json(sample_body())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        payload,
        json!({
            "id": 40,
            "walletId": 1,
            "partyId": 2,
            "amount": -1250,
            "description": "Lunch",
            "occurredAt": "2026-03-01T12:00:00Z",
        })
    );
}

#[actix_web::test]
async fn invalid_payloads_never_reach_the_service() {
    let mut service = MockTransactionService::new();
    service.expect_update().times(0);
    let app = app_for!(state_with(service));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/transactions/3")
            .insert_header((AUTHORIZATION, bearer_for(9, "ada@example.com")))
            .set_json(json!({"walletId": 1, "partyId": 2, "amount": 0}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case(Error::forbidden("transaction belongs to another user"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("transaction not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("transaction repository error: pool exhausted"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn service_failures_keep_their_status(#[case] failure: Error, #[case] expected: StatusCode) {
    let mut service = MockTransactionService::new();
    service
        .expect_delete()
        .withf(|user, id| *user == UserId::new(9).expect("id") && id.get() == 3)
        .times(1)
        .return_once(move |_, _| Err(failure));
    let app = app_for!(state_with(service));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/transactions/3")
            .insert_header((AUTHORIZATION, bearer_for(9, "ada@example.com")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn referencing_another_users_wallet_is_forbidden() {
    let state = fixture_state();
    let owner = UserId::new(1).expect("id");
    let intruder = UserId::new(2).expect("id");
    let name = |raw: &str| crate::domain::ResourceName::new(raw).expect("name");
    let foreign_wallet = state
        .wallets
        .create(owner, &name("Savings"))
        .await
        .expect("wallet");
    let own_party = state
        .parties
        .create(intruder, &name("Shop"))
        .await
        .expect("party");
    let app = app_for!(state);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/transactions")
            .insert_header((AUTHORIZATION, bearer_for(2, "eve@example.com")))
            .set_json(json!({
                "walletId": foreign_wallet.id.get(),
                "partyId": own_party.id.get(),
                "amount": 100,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let err: Error = actix_test::read_body_json(res).await;
    assert_eq!(
        err.details(),
        Some(&json!({"resource": "wallet", "id": foreign_wallet.id.get(), "code": "not_owner"}))
    );
}
