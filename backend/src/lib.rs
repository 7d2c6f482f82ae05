//! Drink record service.
//!
//! Stores one amount per day and drink type in SQLite and serves monthly
//! and yearly views over HTTP. The crate follows a ports-and-adapters
//! layout:
//!
//! - [`domain`]: record types, validation, services and port traits.
//! - [`inbound`]: actix-web handlers translating HTTP into port calls.
//! - [`outbound`]: the Diesel repository, pool and embedded schema.
//! - [`server`]: application assembly; [`settings`]: configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod sample_data;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
