//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed drink record model and the services
//! that validate, store and aggregate records. Types here are transport
//! agnostic; inbound adapters translate them to HTTP and outbound adapters
//! to SQL.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - DrinkType, Amount, RecordDate, Record: validated record values.
//! - RecordsService: implementation of the record driving ports.
//! - SampleRecordSeeder: applies the built-in sample set.

pub mod error;
pub mod ports;
pub mod record;
pub mod records_service;
pub mod sample_records;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::record::{
    Amount, DrinkTotal, DrinkType, Month, MonthlyTotal, Record, RecordDate, RecordKey,
    RecordValidationError, StoredRecord, Year, month_key,
};
pub use self::records_service::RecordsService;
pub use self::sample_records::{
    SampleRecordSeeder, SampleSeedOutcome, SampleSeedingError, sample_records,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use drinklog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Record not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
