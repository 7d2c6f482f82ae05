//! Apply the built-in sample drink records to a database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};

use clap::Parser;
use drinklog::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use drinklog::sample_data::seed_sample_records;
use tokio::runtime::Builder;

const DEFAULT_DATABASE_URL: &str = "drinklog.sqlite3";

/// `seed-records` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-records",
    about = "Insert the sample drink records, leaving already logged dates alone",
    version
)]
struct CliArgs {
    /// SQLite database path. Falls back to `DRINKLOG_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "path")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    run_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("apply schema: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let outcome = seed_sample_records(&pool)
        .await
        .map_err(|error| io::Error::other(format!("seed sample records: {error}")))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "database={database_url}")?;
    writeln!(stdout, "inserted={}", outcome.inserted)?;
    writeln!(stdout, "skipped={}", outcome.skipped)
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    Ok(env::var("DRINKLOG_DATABASE_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()))
}
