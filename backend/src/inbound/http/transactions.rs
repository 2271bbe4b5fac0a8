//! Transaction endpoints.
//!
//! ```text
//! GET    /transactions
//! POST   /transactions       {"walletId":1,"partyId":2,"amount":-1250,"description":"Lunch"}
//! GET    /transactions/{id}
//! PUT    /transactions/{id}  {"walletId":1,"partyId":2,"amount":-1300}
//! DELETE /transactions/{id}
//! ```
//!
//! Create and update answer `403` when the referenced wallet or party
//! belongs to another user. `occurredAt` defaults to the time the request was
//! handled.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, PartyId, Transaction, TransactionDraft, TransactionId, WalletId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, TransactionSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_resource_id, parse_rfc3339_timestamp, require, transaction_error, FieldName,
};
use crate::inbound::http::ApiResult;

/// Create/update payload.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
    pub wallet_id: Option<i64>,
    pub party_id: Option<i64>,
    /// Minor currency units; negative for money leaving the wallet.
    pub amount: Option<i64>,
    pub description: Option<String>,
    /// RFC 3339 timestamp.
    #[schema(example = "2026-03-01T12:00:00Z")]
    pub occurred_at: Option<String>,
}

impl TryFrom<TransactionBody> for TransactionDraft {
    type Error = Error;

    fn try_from(body: TransactionBody) -> Result<Self, Self::Error> {
        let wallet_field = FieldName::new("walletId");
        let party_field = FieldName::new("partyId");
        let wallet_id: WalletId =
            parse_resource_id(require(body.wallet_id, wallet_field)?, wallet_field)?;
        let party_id: PartyId =
            parse_resource_id(require(body.party_id, party_field)?, party_field)?;
        let amount = require(body.amount, FieldName::new("amount"))?;
        let occurred_at = match body.occurred_at.as_deref() {
            Some(raw) => parse_rfc3339_timestamp(raw, FieldName::new("occurredAt"))?,
            None => Utc::now(),
        };
        TransactionDraft::try_new(wallet_id, party_id, amount, body.description, occurred_at)
            .map_err(transaction_error)
    }
}

#[utoipa::path(
    get,
    path = "/transactions",
    responses(
        (status = 200, description = "Caller's transactions, newest first", body = [TransactionSchema]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "listTransactions"
)]
#[get("")]
pub async fn list_transactions(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Transaction>>> {
    Ok(web::Json(state.transactions.list(user.user_id).await?))
}

#[utoipa::path(
    post,
    path = "/transactions",
    request_body = TransactionBody,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionSchema),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Wallet or party owned by another user", body = ErrorSchema),
        (status = 404, description = "Wallet or party not found", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "createTransaction"
)]
#[post("")]
pub async fn create_transaction(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<TransactionBody>,
) -> ApiResult<HttpResponse> {
    let draft = TransactionDraft::try_from(payload.into_inner())?;
    let transaction = state.transactions.create(user.user_id, &draft).await?;
    Ok(HttpResponse::Created().json(transaction))
}

#[utoipa::path(
    get,
    path = "/transactions/{id}",
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction", body = TransactionSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "getTransaction"
)]
#[get("/{id}")]
pub async fn get_transaction(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<TransactionId>,
) -> ApiResult<web::Json<Transaction>> {
    let transaction = state.transactions.get(user.user_id, id.into_inner()).await?;
    Ok(web::Json(transaction))
}

#[utoipa::path(
    put,
    path = "/transactions/{id}",
    params(("id" = i64, Path, description = "Transaction id")),
    request_body = TransactionBody,
    responses(
        (status = 200, description = "Transaction replaced", body = TransactionSchema),
        (status = 400, description = "Invalid id or payload", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Transaction, wallet or party owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "updateTransaction"
)]
#[put("/{id}")]
pub async fn update_transaction(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<TransactionId>,
    payload: web::Json<TransactionBody>,
) -> ApiResult<web::Json<Transaction>> {
    let draft = TransactionDraft::try_from(payload.into_inner())?;
    let transaction = state
        .transactions
        .update(user.user_id, id.into_inner(), &draft)
        .await?;
    Ok(web::Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["transactions"],
    operation_id = "deleteTransaction"
)]
#[delete("/{id}")]
pub async fn delete_transaction(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<TransactionId>,
) -> ApiResult<HttpResponse> {
    state
        .transactions
        .delete(user.user_id, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
