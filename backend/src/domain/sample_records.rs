//! Sample drink records and the seeder that applies them.
//!
//! The sample set covers late September and early October 2024. Seeding
//! never overwrites: any date that already held a record before the run is
//! left alone, along with every sample entry for that date.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{Amount, DrinkType, Record, RecordDate, RecordValidationError};

/// `(date, drink type, half portions)` for every sample entry.
const SAMPLE_ENTRIES: [(&str, DrinkType, u8); 13] = [
    ("2024-09-20", DrinkType::Soju, 5),
    ("2024-09-23", DrinkType::Soju, 3),
    ("2024-09-26", DrinkType::Soju, 4),
    ("2024-09-27", DrinkType::Soju, 5),
    ("2024-09-28", DrinkType::Soju, 3),
    ("2024-10-02", DrinkType::Soju, 5),
    ("2024-10-02", DrinkType::Beer, 2),
    ("2024-10-04", DrinkType::Soju, 4),
    ("2024-10-05", DrinkType::Soju, 2),
    ("2024-10-06", DrinkType::Beer, 2),
    ("2024-10-08", DrinkType::Soju, 4),
    ("2024-10-11", DrinkType::Soju, 4),
    ("2024-10-12", DrinkType::Soju, 6),
];

/// Build the sample record set.
///
/// # Errors
///
/// Returns [`RecordValidationError`] if a sample entry is malformed.
pub fn sample_records() -> Result<Vec<Record>, RecordValidationError> {
    SAMPLE_ENTRIES
        .iter()
        .map(|(date, drink_type, halves)| -> Result<Record, RecordValidationError> {
            Ok(Record::new(
                date.parse()?,
                *drink_type,
                Amount::from_halves(*halves)?,
            ))
        })
        .collect()
}

/// Counts reported by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleSeedOutcome {
    /// Entries written to storage.
    pub inserted: usize,
    /// Entries left out because their date already held records.
    pub skipped: usize,
}

/// Errors raised while applying sample records.
#[derive(Debug, Error)]
pub enum SampleSeedingError {
    /// A sample entry failed validation.
    #[error("sample record is invalid: {0}")]
    InvalidSample(#[from] RecordValidationError),
    /// Persistence adapter failed while seeding.
    #[error("sample record persistence error: {0}")]
    Persistence(#[from] RecordRepositoryError),
}

/// Service that applies sample records through the record repository.
#[derive(Clone)]
pub struct SampleRecordSeeder<R> {
    repository: Arc<R>,
}

impl<R> SampleRecordSeeder<R> {
    /// Create a new seeder with the given persistence adapter.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> SampleRecordSeeder<R>
where
    R: RecordRepository,
{
    /// Apply the built-in sample set.
    ///
    /// # Errors
    ///
    /// Returns [`SampleSeedingError`] if a sample entry is invalid or the
    /// repository fails.
    pub async fn seed_samples(&self) -> Result<SampleSeedOutcome, SampleSeedingError> {
        let records = sample_records()?;
        self.seed(records).await
    }

    /// Apply `records`, grouped by date.
    ///
    /// # Errors
    ///
    /// Returns [`SampleSeedingError::Persistence`] if a lookup or insert
    /// fails for any reason other than a key collision.
    pub async fn seed(&self, records: Vec<Record>) -> Result<SampleSeedOutcome, SampleSeedingError> {
        let mut by_date: BTreeMap<RecordDate, Vec<Record>> = BTreeMap::new();
        for record in records {
            by_date.entry(record.date).or_default().push(record);
        }

        let mut outcome = SampleSeedOutcome::default();
        for (date, group) in by_date {
            let existing = self.repository.find_by_date(&date).await?;
            if !existing.is_empty() {
                debug!(%date, entries = group.len(), "date already logged; skipping samples");
                outcome.skipped += group.len();
                continue;
            }

            for record in group {
                match self.repository.insert(&record).await {
                    Ok(()) => outcome.inserted += 1,
                    Err(RecordRepositoryError::Duplicate { .. }) => outcome.skipped += 1,
                    Err(err) => return Err(err.into()),
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoredRecord;
    use crate::domain::ports::MockRecordRepository;
    use chrono::NaiveDate;
    use mockall::predicate::function;
    use rstest::rstest;

    fn existing_on(date: RecordDate) -> StoredRecord {
        StoredRecord {
            date,
            drink_type: DrinkType::Beer,
            amount: 1.0,
            created_at: NaiveDate::from_ymd_opt(2024, 10, 2)
                .and_then(|day| day.and_hms_opt(21, 0, 0))
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn sample_set_is_valid_and_unique() {
        let records = sample_records().expect("samples are valid");
        let mut keys: Vec<_> = records.iter().map(Record::key).collect();
        keys.sort();
        keys.dedup();

        assert_eq!(records.len(), 13);
        assert_eq!(keys.len(), records.len());
        let total: f64 = records.iter().map(|record| record.amount.as_f64()).sum();
        assert_eq!(total, 24.5);
    }

    #[tokio::test]
    async fn seeding_inserts_every_sample_into_empty_store() {
        let mut repo = MockRecordRepository::new();
        repo.expect_find_by_date().returning(|_| Ok(Vec::new()));
        repo.expect_insert().times(13).returning(|_| Ok(()));

        let outcome = SampleRecordSeeder::new(Arc::new(repo))
            .seed_samples()
            .await
            .expect("seeding succeeds");

        assert_eq!(
            outcome,
            SampleSeedOutcome {
                inserted: 13,
                skipped: 0
            }
        );
    }

    #[tokio::test]
    async fn seeding_leaves_logged_dates_alone() {
        let logged: RecordDate = "2024-10-02".parse().expect("valid date");
        let mut repo = MockRecordRepository::new();
        repo.expect_find_by_date().returning(move |date| {
            if *date == logged {
                Ok(vec![existing_on(logged)])
            } else {
                Ok(Vec::new())
            }
        });
        repo.expect_insert()
            .with(function(move |record: &Record| record.date != logged))
            .times(11)
            .returning(|_| Ok(()));

        let outcome = SampleRecordSeeder::new(Arc::new(repo))
            .seed_samples()
            .await
            .expect("seeding succeeds");

        assert_eq!(outcome.inserted, 11);
        assert_eq!(outcome.skipped, 2);
    }

    #[tokio::test]
    async fn seeding_counts_collisions_as_skipped() {
        let mut repo = MockRecordRepository::new();
        repo.expect_find_by_date().returning(|_| Ok(Vec::new()));
        repo.expect_insert()
            .returning(|record| Err(RecordRepositoryError::duplicate_key(&record.key())));

        let outcome = SampleRecordSeeder::new(Arc::new(repo))
            .seed_samples()
            .await
            .expect("collisions are not fatal");

        assert_eq!(outcome.inserted, 0);
        assert_eq!(outcome.skipped, 13);
    }

    #[tokio::test]
    async fn seeding_stops_on_storage_failure() {
        let mut repo = MockRecordRepository::new();
        repo.expect_find_by_date()
            .times(1)
            .returning(|_| Err(RecordRepositoryError::connection("refused")));
        repo.expect_insert().never();

        let result = SampleRecordSeeder::new(Arc::new(repo)).seed_samples().await;

        assert!(matches!(result, Err(SampleSeedingError::Persistence(_))));
    }
}
