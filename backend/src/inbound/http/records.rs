//! Drink record HTTP handlers.
//!
//! ```text
//! GET    /api/records/{year}/{month}
//! GET    /api/records/{year}
//! POST   /api/records
//! DELETE /api/records/{date}/{drinkType}
//! ```
//!
//! Every handler validates its input before touching a port, so malformed
//! requests never reach storage.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{RecordsByDate, TotalsByMonth};
use crate::domain::{DrinkType, Record, RecordKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DrinkTotalSchema, DrinkTypeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    amount_from_json, date_from_json, drink_type_from_json, parse_date, parse_drink_type,
    parse_month, parse_year,
};

/// Request payload for creating a record.
///
/// Members are optional at the serde layer so validation can report the
/// first missing or malformed field in a fixed order.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRecordRequest {
    /// Calendar day as `YYYY-MM-DD`.
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub date: Option<Value>,
    #[schema(value_type = DrinkTypeSchema)]
    pub drink_type: Option<Value>,
    /// One of `0.5, 1, 1.5, ..., 5`.
    #[schema(value_type = f64, example = 3.5)]
    pub amount: Option<Value>,
}

/// A stored record as returned by the create endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    #[schema(format = Date, example = "2024-01-01")]
    pub date: String,
    #[schema(value_type = DrinkTypeSchema)]
    pub drink_type: DrinkType,
    #[schema(example = 3.5)]
    pub amount: f64,
}

impl From<Record> for RecordResponse {
    fn from(value: Record) -> Self {
        Self {
            date: value.date.to_string(),
            drink_type: value.drink_type,
            amount: value.amount.as_f64(),
        }
    }
}

/// Key of a deleted record.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedRecordResponse {
    #[schema(format = Date, example = "2024-01-01")]
    pub date: String,
    #[schema(value_type = DrinkTypeSchema)]
    pub drink_type: DrinkType,
}

impl From<RecordKey> for DeletedRecordResponse {
    fn from(value: RecordKey) -> Self {
        Self {
            date: value.date.to_string(),
            drink_type: value.drink_type,
        }
    }
}

fn parse_create_request(payload: CreateRecordRequest) -> ApiResult<Record> {
    let date = date_from_json(payload.date)?;
    let drink_type = drink_type_from_json(payload.drink_type)?;
    let amount = amount_from_json(payload.amount)?;
    Ok(Record::new(date, drink_type, amount))
}

fn parse_record_key(date: &str, drink_type: &str) -> ApiResult<RecordKey> {
    Ok(RecordKey {
        date: parse_date(date)?,
        drink_type: parse_drink_type(drink_type)?,
    })
}

/// List the records of one month grouped by date.
#[utoipa::path(
    get,
    path = "/api/records/{year}/{month}",
    description = "Records of one month keyed by `YYYY-MM-DD`, in insertion order per day.",
    params(
        ("year" = String, Path, description = "Four-digit year", example = "2024"),
        ("month" = String, Path, description = "Month number 1-12", example = "10")
    ),
    responses(
        (status = 200, description = "Records by date", body = std::collections::BTreeMap<String, Vec<DrinkTotalSchema>>),
        (status = 400, description = "Invalid year or month", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "listRecordsForMonth"
)]
#[get("/{year}/{month}")]
pub async fn list_month(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<RecordsByDate>> {
    let (year, month) = path.into_inner();
    let year = parse_year(&year)?;
    let month = parse_month(&month)?;

    let records = state.records_query.records_for_month(year, month).await?;
    Ok(web::Json(records))
}

/// List monthly totals per drink type for one year.
#[utoipa::path(
    get,
    path = "/api/records/{year}",
    description = "Summed amounts keyed by `YYYY-MM`, one entry per drink type.",
    params(
        ("year" = String, Path, description = "Four-digit year", example = "2024")
    ),
    responses(
        (status = 200, description = "Totals by month", body = std::collections::BTreeMap<String, Vec<DrinkTotalSchema>>),
        (status = 400, description = "Invalid year", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "listRecordTotalsForYear"
)]
#[get("/{year}")]
pub async fn list_year(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TotalsByMonth>> {
    let year = parse_year(&path.into_inner())?;

    let totals = state.records_query.totals_for_year(year).await?;
    Ok(web::Json(totals))
}

/// Create a record.
#[utoipa::path(
    post,
    path = "/api/records",
    request_body = CreateRecordRequest,
    responses(
        (status = 201, description = "Record created", body = RecordResponse),
        (status = 400, description = "Invalid record", body = ErrorSchema),
        (status = 409, description = "Record already exists for this date and drink type", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "createRecord"
)]
#[post("")]
pub async fn create_record(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRecordRequest>,
) -> ApiResult<HttpResponse> {
    let record = parse_create_request(payload.into_inner())?;

    let created = state.records.create(record).await?;
    Ok(HttpResponse::Created().json(RecordResponse::from(created)))
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/api/records/{date}/{drinkType}",
    params(
        ("date" = String, Path, description = "Calendar day as YYYY-MM-DD", example = "2024-01-01"),
        ("drinkType" = DrinkTypeSchema, Path, description = "Drink type")
    ),
    responses(
        (status = 200, description = "Record deleted", body = DeletedRecordResponse),
        (status = 400, description = "Invalid date or drink type", body = ErrorSchema),
        (status = 404, description = "Record not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "deleteRecord"
)]
#[delete("/{date}/{drink_type}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<DeletedRecordResponse>> {
    let (date, drink_type) = path.into_inner();
    let key = parse_record_key(&date, &drink_type)?;

    let deleted = state.records.delete(key).await?;
    Ok(web::Json(DeletedRecordResponse::from(deleted)))
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
