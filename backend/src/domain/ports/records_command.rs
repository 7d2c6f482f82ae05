//! Driving port for record mutations.
//!
//! HTTP handlers call [`RecordsCommand`] to create and delete records once
//! the request has been validated.

use async_trait::async_trait;

use crate::domain::{Error, Record, RecordKey};

/// Driving port for creating and deleting records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsCommand: Send + Sync {
    /// Store a new record and return it.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when a record with the same date and drink
    /// type exists, or an unavailable/internal error when storage fails.
    async fn create(&self, record: Record) -> Result<Record, Error>;

    /// Remove the record identified by `key` and return the key.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no record matches the key.
    async fn delete(&self, key: RecordKey) -> Result<RecordKey, Error>;
}

/// Fixture implementation for testing.
///
/// Echoes its input without touching storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordsCommand;

#[async_trait]
impl RecordsCommand for FixtureRecordsCommand {
    async fn create(&self, record: Record) -> Result<Record, Error> {
        Ok(record)
    }

    async fn delete(&self, key: RecordKey) -> Result<RecordKey, Error> {
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, DrinkType};

    #[tokio::test]
    async fn fixture_command_echoes_created_record() {
        let record = Record::new(
            "2024-10-02".parse().expect("valid date"),
            DrinkType::Beer,
            Amount::try_from(1.0).expect("valid amount"),
        );

        let created = FixtureRecordsCommand
            .create(record)
            .await
            .expect("fixture create succeeds");

        assert_eq!(created, record);
    }
}
