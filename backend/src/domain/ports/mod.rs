//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod record_repository;
mod records_command;
mod records_query;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
pub use record_repository::{FixtureRecordRepository, RecordRepository, RecordRepositoryError};
#[cfg(test)]
pub use records_command::MockRecordsCommand;
pub use records_command::{FixtureRecordsCommand, RecordsCommand};
#[cfg(test)]
pub use records_query::MockRecordsQuery;
pub use records_query::{FixtureRecordsQuery, RecordsByDate, RecordsQuery, TotalsByMonth};
