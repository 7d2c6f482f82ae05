//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No record matches the request.
    #[schema(rename = "not_found")]
    NotFound,
    /// A record with the same date and drink type already exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "\"date\" must be in ISO 8601 date format")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::DrinkType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DrinkType)]
pub enum DrinkTypeSchema {
    #[schema(rename = "soju")]
    Soju,
    #[schema(rename = "beer")]
    Beer,
}

/// OpenAPI schema for [`crate::domain::DrinkTotal`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DrinkTotal, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DrinkTotalSchema {
    drink_type: DrinkTypeSchema,
    /// Portions, or the monthly sum of portions.
    #[schema(example = 2.5)]
    amount: f64,
}
