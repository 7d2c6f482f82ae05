//! SQLite-backed `RecordRepository` implementation using Diesel ORM.
//!
//! Every operation is a single statement. Uniqueness of `(date, drinkType)`
//! is enforced by the table's primary key; collisions surface as
//! [`RecordRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{
    DrinkType, Month, MonthlyTotal, Record, RecordDate, RecordKey, StoredRecord, Year,
};

use super::models::{MonthlyTotalRow, NewRecordRow, RecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::records;

const MONTHLY_TOTALS_SQL: &str = "\
SELECT strftime('%m', date) AS month, drinkType AS drink_type, SUM(amount) AS amount \
FROM records \
WHERE strftime('%Y', date) = ? \
GROUP BY strftime('%m', date), drinkType \
ORDER BY month, drinkType";

/// Diesel-backed implementation of the `RecordRepository` port.
#[derive(Clone)]
pub struct DieselRecordRepository {
    pool: DbPool,
}

impl DieselRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::QueryBuilderError(_) => RecordRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            RecordRepositoryError::query("record violates a table constraint")
        }
        _ => RecordRepositoryError::query("database error"),
    }
}

/// Map insert failures, reporting primary key collisions as duplicates.
fn map_insert_error(error: diesel::result::Error, key: &RecordKey) -> RecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RecordRepositoryError::duplicate_key(key)
        }
        other => map_diesel_error(other),
    }
}

/// Convert a database row to a domain `StoredRecord`.
fn row_to_record(row: RecordRow) -> Result<StoredRecord, RecordRepositoryError> {
    let date: RecordDate = row.date.parse().map_err(|_| {
        warn!(value = %row.date, "stored record has a malformed date");
        RecordRepositoryError::query(format!("stored record has invalid date {}", row.date))
    })?;
    let drink_type: DrinkType = row.drink_type.parse().map_err(|_| {
        warn!(value = %row.drink_type, %date, "stored record has an unknown drink type");
        RecordRepositoryError::query(format!(
            "stored record has unknown drink type {}",
            row.drink_type
        ))
    })?;

    Ok(StoredRecord {
        date,
        drink_type,
        amount: row.amount,
        created_at: row.created_at,
    })
}

fn row_to_monthly_total(row: MonthlyTotalRow) -> Result<MonthlyTotal, RecordRepositoryError> {
    let month = row
        .month
        .parse::<u8>()
        .ok()
        .and_then(|value| Month::new(value).ok())
        .ok_or_else(|| {
            RecordRepositoryError::query(format!("aggregated invalid month {}", row.month))
        })?;
    let drink_type: DrinkType = row.drink_type.parse().map_err(|_| {
        RecordRepositoryError::query(format!(
            "aggregated unknown drink type {}",
            row.drink_type
        ))
    })?;

    Ok(MonthlyTotal {
        month,
        drink_type,
        amount: row.amount,
    })
}

fn rows_to_records(rows: Vec<RecordRow>) -> Result<Vec<StoredRecord>, RecordRepositoryError> {
    rows.into_iter().map(row_to_record).collect()
}

/// `YYYY-MM-%` pattern matching every date of one month.
fn month_pattern(year: Year, month: Month) -> String {
    format!("{year}-{month}-%")
}

#[async_trait]
impl RecordRepository for DieselRecordRepository {
    async fn find_by_key(
        &self,
        key: &RecordKey,
    ) -> Result<Option<StoredRecord>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let date = key.date.to_string();

        let row = records::table
            .filter(records::date.eq(date.as_str()))
            .filter(records::drink_type.eq(key.drink_type.as_str()))
            .select(RecordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn find_by_date(
        &self,
        date: &RecordDate,
    ) -> Result<Vec<StoredRecord>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let date = date.to_string();

        let rows: Vec<RecordRow> = records::table
            .filter(records::date.eq(date.as_str()))
            .order_by((records::created_at.asc(), sql::<BigInt>("rowid").asc()))
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_records(rows)
    }

    async fn insert(&self, record: &Record) -> Result<(), RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let date = record.date.to_string();
        let row = NewRecordRow {
            date: &date,
            drink_type: record.drink_type.as_str(),
            amount: record.amount.as_f64(),
        };

        diesel::insert_into(records::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &record.key()))?;

        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> Result<bool, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let date = key.date.to_string();

        let affected = diesel::delete(
            records::table
                .filter(records::date.eq(date.as_str()))
                .filter(records::drink_type.eq(key.drink_type.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn list_month(
        &self,
        year: Year,
        month: Month,
    ) -> Result<Vec<StoredRecord>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecordRow> = records::table
            .filter(records::date.like(month_pattern(year, month)))
            .order_by((
                records::date.asc(),
                records::created_at.asc(),
                sql::<BigInt>("rowid").asc(),
            ))
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_records(rows)
    }

    async fn monthly_totals(
        &self,
        year: Year,
    ) -> Result<Vec<MonthlyTotal>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MonthlyTotalRow> = sql_query(MONTHLY_TOTALS_SQL)
            .bind::<Text, _>(year.to_string())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_monthly_total).collect()
    }
}
