//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{Double, Text};

use super::schema::records;

/// Row struct for reading from the records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RecordRow {
    pub date: String,
    pub drink_type: String,
    pub amount: f64,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for creating new records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = records)]
pub(crate) struct NewRecordRow<'a> {
    pub date: &'a str,
    pub drink_type: &'a str,
    pub amount: f64,
}

/// One `(month, drink type)` group of the yearly aggregation.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct MonthlyTotalRow {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = Text)]
    pub drink_type: String,
    #[diesel(sql_type = Double)]
    pub amount: f64,
}
