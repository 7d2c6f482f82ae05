//! Async-safe connection pool for Diesel SQLite connections.
//!
//! SQLite has no native async driver, so each pooled connection is a
//! `diesel-async` [`SyncConnectionWrapper`] around a blocking
//! `SqliteConnection`. `bb8` handles checkout and validation.
//!
//! Every new connection sets a busy timeout and switches the database to
//! write-ahead logging so concurrent readers do not block the writer.

use std::time::Duration;

use diesel::{ConnectionError, ConnectionResult, SqliteConnection};
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Async connection type handed out by [`DbPool`].
pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

const CONNECTION_SETUP: &str = "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;";

pub(crate) const IN_MEMORY_UNSUPPORTED: &str =
    "in-memory and temporary SQLite databases are not shared between connections; \
     configure a database file path";

/// Whether `database_url` opens a private database per connection.
///
/// `:memory:`, `mode=memory` URIs and the empty path all give every pooled
/// connection its own database, so the schema applied at start-up would be
/// invisible to request handlers.
pub(crate) fn is_connection_private(database_url: &str) -> bool {
    let url = database_url.trim();
    url.is_empty()
        || url == ":memory:"
        || url.starts_with("file::memory:")
        || (url.starts_with("file:") && url.contains("mode=memory"))
}

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use drinklog::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("drinklog.sqlite3")
///     .with_max_size(8)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "drinklog.sqlite3");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the SQLite file at `database_url`.
    ///
    /// Defaults: 4 connections, 1 kept idle, 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 4,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

fn establish_connection(database_url: &str) -> BoxFuture<'_, ConnectionResult<DbConnection>> {
    async move {
        let mut conn = DbConnection::establish(database_url).await?;
        conn.batch_execute(CONNECTION_SETUP)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

/// Async connection pool for SQLite via Diesel.
///
/// Cloning is cheap; clones share the same underlying pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<DbConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed, for
    /// example when the database file cannot be opened, `max_size` is zero,
    /// or the URL names an in-memory database.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        if is_connection_private(&config.database_url) {
            return Err(PoolError::build(IN_MEMORY_UNSUPPORTED));
        }
        if config.max_size == 0 {
            return Err(PoolError::build("max_size must be greater than zero"));
        }
        let min_idle = config.min_idle.map(|idle| idle.min(config.max_size));

        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish_connection);
        let manager = AsyncDieselConnectionManager::<DbConnection>::new_with_config(
            &config.database_url,
            manager_config,
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, DbConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
