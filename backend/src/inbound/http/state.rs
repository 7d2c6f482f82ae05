//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureRecordsCommand, FixtureRecordsQuery, RecordsCommand, RecordsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub records: Arc<dyn RecordsCommand>,
    pub records_query: Arc<dyn RecordsQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(records: Arc<dyn RecordsCommand>, records_query: Arc<dyn RecordsQuery>) -> Self {
        Self {
            records,
            records_query,
        }
    }

    /// State backed by one service implementing both record ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RecordsCommand + RecordsQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}

impl Default for HttpState {
    /// Fixture-backed state for tests and documentation builds.
    fn default() -> Self {
        Self::new(Arc::new(FixtureRecordsCommand), Arc::new(FixtureRecordsQuery))
    }
}
