//! Service entry-point: loads configuration, prepares the database and
//! serves the record API until a shutdown signal arrives.

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use drinklog::domain::RecordsService;
use drinklog::inbound::http::health::HealthState;
use drinklog::inbound::http::state::HttpState;
use drinklog::outbound::persistence::{DbPool, DieselRecordRepository, PoolConfig, run_migrations};
use drinklog::sample_data::seed_sample_records_on_startup;
use drinklog::server::{ServerConfig, create_server};
use drinklog::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let database_url = settings.database_url();
    info!(database = %database_url, "preparing database");

    let applied = run_migrations(database_url)
        .await
        .map_err(|e| io::Error::other(format!("failed to apply schema: {e}")))?;
    info!(applied, "database schema ready");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|e| io::Error::other(format!("failed to build connection pool: {e}")))?;

    seed_sample_records_on_startup(&settings, &pool)
        .await
        .map_err(|e| io::Error::other(format!("failed to seed sample records: {e}")))?;

    let service = Arc::new(RecordsService::new(Arc::new(DieselRecordRepository::new(
        pool,
    ))));
    let http_state = HttpState::from_service(service);

    let config = ServerConfig::new(settings.bind_addr())
        .with_cors_allowed_origin(settings.cors_allowed_origin());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, config)?;
    info!(
        bind_addr = %settings.bind_addr(),
        cors_origin = settings.cors_allowed_origin().unwrap_or("*"),
        "server listening"
    );

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        health_state.mark_unhealthy();
        info!("shutdown signal received; draining connections");
        handle.stop(true).await;
    });

    server.await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
