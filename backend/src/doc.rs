//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! schema wrappers from [`crate::inbound::http::schemas`] and the bearer
//! token security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, PartySchema, TransactionSchema, UserSchema, WalletSchema,
};
use crate::inbound::http::{parties, transactions, users, wallets};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Expense backend API",
        description = "Per-user wallets, parties and transactions behind bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        users::sign_up,
        users::login,
        wallets::list_wallets,
        wallets::create_wallet,
        wallets::get_wallet,
        wallets::update_wallet,
        wallets::delete_wallet,
        parties::list_parties,
        parties::create_party,
        parties::get_party,
        parties::update_party,
        parties::delete_party,
        transactions::list_transactions,
        transactions::create_transaction,
        transactions::get_transaction,
        transactions::update_transaction,
        transactions::delete_transaction,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        WalletSchema,
        PartySchema,
        TransactionSchema,
        users::SignUpBody,
        users::LoginBody,
        users::LoginResponse,
        wallets::WalletBody,
        parties::PartyBody,
        transactions::TransactionBody,
    )),
    tags(
        (name = "auth", description = "Sign-up and login"),
        (name = "wallets", description = "Caller-owned wallets"),
        (name = "parties", description = "Caller-owned counterparties"),
        (name = "transactions", description = "Caller-owned transactions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const TRANSACTION_SCHEMA_NAME: &str = "crate.domain.Transaction";

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        match components.schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    #[case("/auth/signup")]
    #[case("/auth/login")]
    #[case("/wallets")]
    #[case("/wallets/{id}")]
    #[case("/parties/{id}")]
    #[case("/transactions")]
    #[case("/health/ready")]
    fn endpoints_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn error_schema_uses_camel_case_fields() {
        let fields = object_fields(ERROR_SCHEMA_NAME);
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[test]
    fn transaction_schema_omits_the_owner() {
        let fields = object_fields(TRANSACTION_SCHEMA_NAME);
        assert!(fields.iter().any(|f| f == "walletId"));
        assert!(!fields.iter().any(|f| f == "userId"));
    }
}
