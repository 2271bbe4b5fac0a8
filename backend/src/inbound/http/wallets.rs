//! Wallet endpoints.
//!
//! ```text
//! GET    /wallets
//! POST   /wallets        {"name":"cash"}
//! GET    /wallets/{id}
//! PUT    /wallets/{id}   {"name":"savings"}
//! DELETE /wallets/{id}
//! ```
//!
//! All routes require a bearer token. Single-wallet routes answer `403` when
//! the wallet belongs to another user.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ResourceName, Wallet, WalletId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, WalletSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require, resource_name_error, FieldName};
use crate::inbound::http::ApiResult;

/// Create/rename payload.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct WalletBody {
    pub name: Option<String>,
}

impl WalletBody {
    fn into_name(self) -> Result<ResourceName, Error> {
        let raw = require(self.name, FieldName::new("name"))?;
        ResourceName::new(raw).map_err(resource_name_error)
    }
}

#[utoipa::path(
    get,
    path = "/wallets",
    responses(
        (status = 200, description = "Caller's wallets", body = [WalletSchema]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["wallets"],
    operation_id = "listWallets"
)]
#[get("")]
pub async fn list_wallets(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Wallet>>> {
    Ok(web::Json(state.wallets.list(user.user_id).await?))
}

#[utoipa::path(
    post,
    path = "/wallets",
    request_body = WalletBody,
    responses(
        (status = 201, description = "Wallet created", body = WalletSchema),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 409, description = "Name already used", body = ErrorSchema)
    ),
    tags = ["wallets"],
    operation_id = "createWallet"
)]
#[post("")]
pub async fn create_wallet(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<WalletBody>,
) -> ApiResult<HttpResponse> {
    let name = payload.into_inner().into_name()?;
    let wallet = state.wallets.create(user.user_id, &name).await?;
    Ok(HttpResponse::Created().json(wallet))
}

#[utoipa::path(
    get,
    path = "/wallets/{id}",
    params(("id" = i64, Path, description = "Wallet id")),
    responses(
        (status = 200, description = "Wallet", body = WalletSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["wallets"],
    operation_id = "getWallet"
)]
#[get("/{id}")]
pub async fn get_wallet(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<WalletId>,
) -> ApiResult<web::Json<Wallet>> {
    Ok(web::Json(
        state.wallets.get(user.user_id, id.into_inner()).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/wallets/{id}",
    params(("id" = i64, Path, description = "Wallet id")),
    request_body = WalletBody,
    responses(
        (status = 200, description = "Wallet renamed", body = WalletSchema),
        (status = 400, description = "Invalid id or name", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already used", body = ErrorSchema)
    ),
    tags = ["wallets"],
    operation_id = "updateWallet"
)]
#[put("/{id}")]
pub async fn update_wallet(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<WalletId>,
    payload: web::Json<WalletBody>,
) -> ApiResult<web::Json<Wallet>> {
    let name = payload.into_inner().into_name()?;
    let wallet = state
        .wallets
        .update(user.user_id, id.into_inner(), &name)
        .await?;
    Ok(web::Json(wallet))
}

/// Delete a wallet together with its transactions.
#[utoipa::path(
    delete,
    path = "/wallets/{id}",
    params(("id" = i64, Path, description = "Wallet id")),
    responses(
        (status = 204, description = "Wallet deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["wallets"],
    operation_id = "deleteWallet"
)]
#[delete("/{id}")]
pub async fn delete_wallet(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<WalletId>,
) -> ApiResult<HttpResponse> {
    state.wallets.delete(user.user_id, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockWalletService;
    use crate::domain::{ErrorCode, UserId};
    use crate::inbound::http::error::path_error_handler;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{bearer_for, fixture_state};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn wallet(id: i64, owner: i64, name: &str) -> Wallet {
        Wallet {
            id: WalletId::new(id).expect("id"),
            user_id: UserId::new(owner).expect("id"),
            name: ResourceName::new(name).expect("name"),
        }
    }

    fn state_with(wallets: MockWalletService) -> HttpState {
        let base = fixture_state();
        HttpState::new(HttpStatePorts {
            login: base.login,
            sign_up: base.sign_up,
            tokens: base.tokens,
            wallets: Arc::new(wallets),
            parties: base.parties,
            transactions: base.transactions,
        })
    }

    async fn send(state: HttpState, req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .service(
                    web::scope("/wallets")
                        .service(list_wallets)
                        .service(create_wallet)
                        .service(get_wallet)
                        .service(update_wallet)
                        .service(delete_wallet),
                ),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let bytes = test::read_body(res).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    #[actix_web::test]
    async fn created_wallets_omit_the_owner() {
        let mut wallets = MockWalletService::new();
        wallets
            .expect_create()
            .withf(|user, name| user.get() == 3 && name.as_ref() == "cash")
            .times(1)
            .return_once(|_, _| Ok(wallet(10, 3, "cash")));

        let (status, body) = send(
            state_with(wallets),
            test::TestRequest::post()
                .uri("/wallets")
                .insert_header((AUTHORIZATION, bearer_for(3, "ada@example.com")))
                .set_json(json!({"name": " cash "})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 10, "name": "cash"}));
    }

    #[rstest]
    #[case(json!({}), "missing_field")]
    #[case(json!({"name": "   "}), "invalid_name")]
    #[case(json!({"name": "x".repeat(65)}), "invalid_name")]
    #[actix_web::test]
    async fn invalid_names_are_rejected(#[case] body: Value, #[case] code: &str) {
        let mut wallets = MockWalletService::new();
        wallets.expect_create().times(0);

        let (status, payload) = send(
            state_with(wallets),
            test::TestRequest::post()
                .uri("/wallets")
                .insert_header((AUTHORIZATION, bearer_for(3, "ada@example.com")))
                .set_json(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["details"]["code"], code);
    }

    #[actix_web::test]
    async fn foreign_wallets_are_forbidden() {
        let mut wallets = MockWalletService::new();
        wallets
            .expect_get()
            .times(1)
            .return_once(|_, _| Err(Error::forbidden("wallet belongs to another user")));

        let (status, payload) = send(
            state_with(wallets),
            test::TestRequest::get()
                .uri("/wallets/4")
                .insert_header((AUTHORIZATION, bearer_for(1, "ada@example.com"))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(payload["code"], "forbidden");
    }

    #[rstest]
    #[case("/wallets/0")]
    #[case("/wallets/nope")]
    #[actix_web::test]
    async fn bad_ids_fail_before_the_service(#[case] uri: &str) {
        let mut wallets = MockWalletService::new();
        wallets.expect_get().times(0);

        let (status, payload) = send(
            state_with(wallets),
            test::TestRequest::get()
                .uri(uri)
                .insert_header((AUTHORIZATION, bearer_for(1, "ada@example.com"))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["details"]["code"], "invalid_id");
    }

    #[actix_web::test]
    async fn deletes_answer_no_content() {
        let mut wallets = MockWalletService::new();
        wallets
            .expect_delete()
            .withf(|user, id| user.get() == 1 && id.get() == 4)
            .times(1)
            .return_once(|_, _| Ok(()));

        let (status, body) = send(
            state_with(wallets),
            test::TestRequest::delete()
                .uri("/wallets/4")
                .insert_header((AUTHORIZATION, bearer_for(1, "ada@example.com"))),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[actix_web::test]
    async fn listing_requires_a_token() {
        let mut wallets = MockWalletService::new();
        wallets.expect_list().times(0);

        let (status, payload) =
            send(state_with(wallets), test::TestRequest::get().uri("/wallets")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let err: Error = serde_json::from_value(payload).expect("error payload");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
