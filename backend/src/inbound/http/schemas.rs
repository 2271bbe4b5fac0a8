//! OpenAPI shapes for the users, ledger and error payloads.
//!
//! Domain types do not derive `ToSchema`; these stand-ins describe their JSON
//! form and are registered by name through `#[schema(as = ...)]`. Keep them in
//! step with the serde attributes on the domain side.

#![expect(
    dead_code,
    reason = "Schema structs are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to touch this resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing data.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "wallet belongs to another user")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level details such as `{"field":"email","code":"email_conflict"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    #[schema(example = "ada@example.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::Wallet`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Wallet)]
pub struct WalletSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Cash")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::Party`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Party)]
pub struct PartySchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Grocer")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::Transaction`].
///
/// Amounts are minor currency units; negative values leave the wallet.
#[derive(ToSchema)]
#[schema(as = crate::domain::Transaction)]
#[schema(rename_all = "camelCase")]
pub struct TransactionSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = 1)]
    wallet_id: i64,
    #[schema(example = 2)]
    party_id: i64,
    #[schema(example = json!(-1250))]
    amount: i64,
    #[schema(example = "Weekly shop")]
    description: Option<String>,
    #[schema(value_type = String, format = DateTime, example = "2026-03-01T12:00:00Z")]
    occurred_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_camel_case() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[rstest]
    #[case(UserSchema::name(), "crate.domain.User")]
    #[case(WalletSchema::name(), "crate.domain.Wallet")]
    #[case(PartySchema::name(), "crate.domain.Party")]
    #[case(TransactionSchema::name(), "crate.domain.Transaction")]
    fn resource_schemas_are_named_after_domain_types(
        #[case] name: std::borrow::Cow<'static, str>,
        #[case] expected: &str,
    ) {
        assert_eq!(name, expected);
    }

    #[test]
    fn user_schema_has_no_credential_fields() {
        let schema_json = schema_to_json::<UserSchema>();
        assert!(schema_json.contains("firstName"));
        assert!(!schema_json.contains("password"));
        assert!(!schema_json.contains("salt"));
    }

    #[test]
    fn transaction_schema_exposes_wire_names() {
        let schema_json = schema_to_json::<TransactionSchema>();
        for field in ["walletId", "partyId", "occurredAt"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
