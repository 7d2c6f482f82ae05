//! Drink record domain services.
//!
//! [`RecordsService`] implements both record driving ports on top of a
//! [`RecordRepository`]. Creation is a single insert; the storage primary key
//! is the only duplicate guard.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    RecordRepository, RecordRepositoryError, RecordsByDate, RecordsCommand, RecordsQuery,
    TotalsByMonth,
};
use crate::domain::{DrinkTotal, Error, Month, Record, RecordKey, Year, month_key};

fn map_repository_error(err: RecordRepositoryError) -> Error {
    match err {
        RecordRepositoryError::Connection { message } => {
            error!(%message, "record repository unavailable");
            Error::service_unavailable(format!("record repository unavailable: {message}"))
        }
        RecordRepositoryError::Query { message } => {
            error!(%message, "record repository query failed");
            Error::internal(format!("record repository error: {message}"))
        }
        RecordRepositoryError::Duplicate { date, drink_type } => {
            Error::conflict("Record already exists").with_details(json!({
                "date": date,
                "drinkType": drink_type,
                "code": "duplicate_record",
            }))
        }
    }
}

/// Record service implementing the command and query driving ports.
#[derive(Clone)]
pub struct RecordsService<R> {
    record_repo: Arc<R>,
}

impl<R> RecordsService<R> {
    /// Create a new service over the record repository.
    pub fn new(record_repo: Arc<R>) -> Self {
        Self { record_repo }
    }
}

impl<R> RecordsService<R>
where
    R: RecordRepository,
{
    /// Conflict error for `key`, naming the amount already stored when it
    /// can be read.
    async fn duplicate_conflict(&self, key: &RecordKey) -> Error {
        let existing_amount = match self.record_repo.find_by_key(key).await {
            Ok(found) => found.map(|stored| stored.amount),
            Err(err) => {
                debug!(error = %err, "existing record lookup failed");
                None
            }
        };

        Error::conflict("Record already exists").with_details(json!({
            "date": key.date,
            "drinkType": key.drink_type,
            "existingAmount": existing_amount,
            "code": "duplicate_record",
        }))
    }
}

#[async_trait]
impl<R> RecordsCommand for RecordsService<R>
where
    R: RecordRepository,
{
    async fn create(&self, record: Record) -> Result<Record, Error> {
        match self.record_repo.insert(&record).await {
            Ok(()) => Ok(record),
            Err(RecordRepositoryError::Duplicate { .. }) => {
                Err(self.duplicate_conflict(&record.key()).await)
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn delete(&self, key: RecordKey) -> Result<RecordKey, Error> {
        let deleted = self
            .record_repo
            .delete(&key)
            .await
            .map_err(map_repository_error)?;

        if deleted {
            Ok(key)
        } else {
            Err(Error::not_found("Record not found").with_details(json!({
                "date": key.date,
                "drinkType": key.drink_type,
            })))
        }
    }
}

#[async_trait]
impl<R> RecordsQuery for RecordsService<R>
where
    R: RecordRepository,
{
    async fn records_for_month(&self, year: Year, month: Month) -> Result<RecordsByDate, Error> {
        let records = self
            .record_repo
            .list_month(year, month)
            .await
            .map_err(map_repository_error)?;

        let mut by_date = RecordsByDate::new();
        for record in records {
            by_date
                .entry(record.date.to_string())
                .or_default()
                .push(record.total());
        }
        Ok(by_date)
    }

    async fn totals_for_year(&self, year: Year) -> Result<TotalsByMonth, Error> {
        let totals = self
            .record_repo
            .monthly_totals(year)
            .await
            .map_err(map_repository_error)?;

        let mut by_month = TotalsByMonth::new();
        for total in totals {
            by_month
                .entry(month_key(year, total.month))
                .or_default()
                .push(DrinkTotal {
                    drink_type: total.drink_type,
                    amount: total.amount,
                });
        }
        for entries in by_month.values_mut() {
            entries.sort_by_key(|entry| entry.drink_type.as_str());
        }
        Ok(by_month)
    }
}

#[cfg(test)]
#[path = "records_service_tests.rs"]
mod tests;
