//! Party (counterparty) endpoints.
//!
//! ```text
//! GET    /parties
//! POST   /parties        {"name":"Grocer"}
//! GET    /parties/{id}
//! PUT    /parties/{id}   {"name":"Landlord"}
//! DELETE /parties/{id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Party, PartyId, ResourceName};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, PartySchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require, resource_name_error, FieldName};
use crate::inbound::http::ApiResult;

/// Create/rename payload.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PartyBody {
    pub name: Option<String>,
}

impl PartyBody {
    fn into_name(self) -> Result<ResourceName, Error> {
        let raw = require(self.name, FieldName::new("name"))?;
        ResourceName::new(raw).map_err(resource_name_error)
    }
}

#[utoipa::path(
    get,
    path = "/parties",
    responses(
        (status = 200, description = "Caller's parties", body = [PartySchema]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["parties"],
    operation_id = "listParties"
)]
#[get("")]
pub async fn list_parties(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Party>>> {
    Ok(web::Json(state.parties.list(user.user_id).await?))
}

#[utoipa::path(
    post,
    path = "/parties",
    request_body = PartyBody,
    responses(
        (status = 201, description = "Party created", body = PartySchema),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 409, description = "Name already used", body = ErrorSchema)
    ),
    tags = ["parties"],
    operation_id = "createParty"
)]
#[post("")]
pub async fn create_party(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<PartyBody>,
) -> ApiResult<HttpResponse> {
    let name = payload.into_inner().into_name()?;
    let party = state.parties.create(user.user_id, &name).await?;
    Ok(HttpResponse::Created().json(party))
}

#[utoipa::path(
    get,
    path = "/parties/{id}",
    params(("id" = i64, Path, description = "Party id")),
    responses(
        (status = 200, description = "Party", body = PartySchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["parties"],
    operation_id = "getParty"
)]
#[get("/{id}")]
pub async fn get_party(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<PartyId>,
) -> ApiResult<web::Json<Party>> {
    Ok(web::Json(state.parties.get(user.user_id, id.into_inner()).await?))
}

#[utoipa::path(
    put,
    path = "/parties/{id}",
    params(("id" = i64, Path, description = "Party id")),
    request_body = PartyBody,
    responses(
        (status = 200, description = "Party renamed", body = PartySchema),
        (status = 400, description = "Invalid id or name", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already used", body = ErrorSchema)
    ),
    tags = ["parties"],
    operation_id = "updateParty"
)]
#[put("/{id}")]
pub async fn update_party(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<PartyId>,
    payload: web::Json<PartyBody>,
) -> ApiResult<web::Json<Party>> {
    let name = payload.into_inner().into_name()?;
    let party = state
        .parties
        .update(user.user_id, id.into_inner(), &name)
        .await?;
    Ok(web::Json(party))
}

/// Delete a party together with the transactions that reference it.
#[utoipa::path(
    delete,
    path = "/parties/{id}",
    params(("id" = i64, Path, description = "Party id")),
    responses(
        (status = 204, description = "Party deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["parties"],
    operation_id = "deleteParty"
)]
#[delete("/{id}")]
pub async fn delete_party(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<PartyId>,
) -> ApiResult<HttpResponse> {
    state.parties.delete(user.user_id, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
