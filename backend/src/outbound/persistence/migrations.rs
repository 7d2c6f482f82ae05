//! Embedded schema definition applied at start-up.
//!
//! The service owns its schema: pending migrations from `migrations/` are
//! compiled into the binary and applied idempotently before the pool serves
//! requests. There is no separate migration tool.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::{IN_MEMORY_UNSUPPORTED, is_connection_private};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying the embedded schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be opened or is not shared between connections.
    #[error("failed to open database for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task did not complete.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply pending migrations on a dedicated blocking connection.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database cannot be opened or a
/// migration fails.
pub async fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_migrations_blocking(&url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}

/// Apply pending migrations on the calling thread.
///
/// Returns the number of migrations applied.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database cannot be opened or a
/// migration fails.
pub fn run_migrations_blocking(database_url: &str) -> Result<usize, MigrationError> {
    if is_connection_private(database_url) {
        return Err(MigrationError::Connection {
            message: IN_MEMORY_UNSUPPORTED.to_owned(),
        });
    }
    let mut conn =
        SqliteConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    for version in &applied {
        info!(%version, "applied schema migration");
    }
    Ok(applied.len())
}
