//! Shared helpers for integration tests.
//!
//! Each test gets its own SQLite file inside a temporary directory with the
//! embedded schema applied. The directory lives as long as the returned
//! [`TestDatabase`].

use std::sync::Arc;

use drinklog::domain::RecordsService;
use drinklog::inbound::http::health::HealthState;
use drinklog::inbound::http::state::HttpState;
use drinklog::outbound::persistence::{DbPool, DieselRecordRepository, PoolConfig, run_migrations};
use drinklog::server::AppDependencies;
use actix_web::web;
use tempfile::TempDir;

/// Temporary migrated database plus a pool over it.
pub struct TestDatabase {
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh database and apply the schema.
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let database_url = dir
            .path()
            .join("records.sqlite3")
            .to_string_lossy()
            .into_owned();
        run_migrations(&database_url)
            .await
            .expect("apply migrations");
        let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(2))
            .await
            .expect("build pool");

        Self {
            pool,
            _dir: dir,
        }
    }

    /// Repository over this database.
    pub fn repository(&self) -> DieselRecordRepository {
        DieselRecordRepository::new(self.pool.clone())
    }

    /// Application dependencies wired to the real service and repository.
    pub fn app_dependencies(&self) -> AppDependencies {
        let service = Arc::new(RecordsService::new(Arc::new(self.repository())));
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();

        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::from_service(service)),
            cors_allowed_origin: None,
        }
    }
}
