//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by SQLite
//! through Diesel, with async access via `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Owned schema**: `migrations/` is embedded and applied at start-up.
//!
//! # Example
//!
//! ```no_run
//! use drinklog::outbound::persistence::{
//!     DbPool, DieselRecordRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! run_migrations("drinklog.sqlite3").await?;
//! let pool = DbPool::new(PoolConfig::new("drinklog.sqlite3")).await?;
//! let _repo = DieselRecordRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_record_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_record_repository::DieselRecordRepository;
pub use migrations::{MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};
