//! Startup wiring for sample record seeding.

mod startup;

pub use startup::{StartupSeedingError, seed_sample_records, seed_sample_records_on_startup};
