//! Port for drink record persistence.
//!
//! The [`RecordRepository`] trait is the only way the domain touches stored
//! records. Adapters enforce uniqueness of `(date, drink type)` with the
//! storage primary key and report collisions as
//! [`RecordRepositoryError::Duplicate`].

use async_trait::async_trait;

use crate::domain::{Month, MonthlyTotal, Record, RecordDate, RecordKey, StoredRecord, Year};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record repository adapters.
    pub enum RecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "record repository query failed: {message}",
        /// A record with the same date and drink type already exists.
        Duplicate { date: String, drink_type: String } =>
            "record for {date} ({drink_type}) already exists",
    }
}

impl RecordRepositoryError {
    /// Duplicate error for the given key.
    pub fn duplicate_key(key: &RecordKey) -> Self {
        Self::duplicate(key.date.to_string(), key.drink_type.as_str())
    }
}

/// Port for record storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetch the record stored under `key`, if any.
    async fn find_by_key(
        &self,
        key: &RecordKey,
    ) -> Result<Option<StoredRecord>, RecordRepositoryError>;

    /// Fetch every record stored for `date`, ordered by insertion time.
    async fn find_by_date(
        &self,
        date: &RecordDate,
    ) -> Result<Vec<StoredRecord>, RecordRepositoryError>;

    /// Insert a new record.
    ///
    /// The insert is a single statement; a colliding key yields
    /// [`RecordRepositoryError::Duplicate`] and leaves the stored row intact.
    async fn insert(&self, record: &Record) -> Result<(), RecordRepositoryError>;

    /// Delete the record stored under `key`.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, key: &RecordKey) -> Result<bool, RecordRepositoryError>;

    /// Records of one month ordered by date, then insertion time.
    async fn list_month(
        &self,
        year: Year,
        month: Month,
    ) -> Result<Vec<StoredRecord>, RecordRepositoryError>;

    /// Amounts of one year summed per month and drink type.
    ///
    /// Rows are ordered by month, then drink type name.
    async fn monthly_totals(
        &self,
        year: Year,
    ) -> Result<Vec<MonthlyTotal>, RecordRepositoryError>;
}

/// Fixture implementation for testing without a database.
///
/// Lookups return nothing, inserts are discarded and deletes report that no
/// row matched.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordRepository;

#[async_trait]
impl RecordRepository for FixtureRecordRepository {
    async fn find_by_key(
        &self,
        _key: &RecordKey,
    ) -> Result<Option<StoredRecord>, RecordRepositoryError> {
        Ok(None)
    }

    async fn find_by_date(
        &self,
        _date: &RecordDate,
    ) -> Result<Vec<StoredRecord>, RecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _record: &Record) -> Result<(), RecordRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _key: &RecordKey) -> Result<bool, RecordRepositoryError> {
        Ok(false)
    }

    async fn list_month(
        &self,
        _year: Year,
        _month: Month,
    ) -> Result<Vec<StoredRecord>, RecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn monthly_totals(
        &self,
        _year: Year,
    ) -> Result<Vec<MonthlyTotal>, RecordRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, DrinkType};
    use rstest::rstest;

    fn sample_record() -> Record {
        Record::new(
            "2024-09-20".parse().expect("valid date"),
            DrinkType::Soju,
            Amount::try_from(2.5).expect("valid amount"),
        )
    }

    #[tokio::test]
    async fn fixture_repository_accepts_inserts_and_finds_nothing() {
        let repo = FixtureRecordRepository;
        let record = sample_record();

        repo.insert(&record).await.expect("fixture insert succeeds");
        let found = repo
            .find_by_key(&record.key())
            .await
            .expect("fixture lookup succeeds");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_repository_delete_reports_no_match() {
        let repo = FixtureRecordRepository;
        let deleted = repo
            .delete(&sample_record().key())
            .await
            .expect("fixture delete succeeds");

        assert!(!deleted);
    }

    #[rstest]
    fn duplicate_error_names_the_key() {
        let error = RecordRepositoryError::duplicate_key(&sample_record().key());

        assert_eq!(error.to_string(), "record for 2024-09-20 (soju) already exists");
    }
}
