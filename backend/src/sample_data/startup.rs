//! Startup seeding orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::{SampleRecordSeeder, SampleSeedOutcome, SampleSeedingError};
use crate::outbound::persistence::{DbPool, DieselRecordRepository};
use crate::settings::ServerSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Sample validation or persistence failed.
    #[error("sample record seeding error: {0}")]
    Seeding(#[from] SampleSeedingError),
}

/// Apply the sample records through the Diesel repository.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when a sample is invalid or storage
/// fails.
pub async fn seed_sample_records(db_pool: &DbPool) -> Result<SampleSeedOutcome, StartupSeedingError> {
    let repository = DieselRecordRepository::new(db_pool.clone());
    let outcome = SampleRecordSeeder::new(Arc::new(repository))
        .seed_samples()
        .await?;

    info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        "sample records applied"
    );
    Ok(outcome)
}

/// Apply the sample records on startup when enabled.
///
/// # Examples
///
/// ```rust,no_run
/// use drinklog::outbound::persistence::{DbPool, PoolConfig};
/// use drinklog::sample_data::seed_sample_records_on_startup;
/// use drinklog::settings::ServerSettings;
///
/// # async fn run(settings: ServerSettings) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new(settings.database_url())).await?;
/// let outcome = seed_sample_records_on_startup(&settings, &pool).await?;
/// if outcome.is_none() {
///     println!("seeding disabled");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn seed_sample_records_on_startup(
    settings: &ServerSettings,
    db_pool: &DbPool,
) -> Result<Option<SampleSeedOutcome>, StartupSeedingError> {
    if !settings.seed_sample_data {
        info!(reason = "disabled", "sample record seeding skipped");
        return Ok(None);
    }

    seed_sample_records(db_pool).await.map(Some)
}
