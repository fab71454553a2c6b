//! # wardhubd: hospital spaces daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`wardhub.toml`, env vars)
//! - Initialize `tracing` from the configured filter
//! - Open the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services and the CORS policy
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT) with a bounded drain, then
//!   close the pool
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;
mod shutdown;

use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wardhub_adapter_http_axum::state::AppState;
use wardhub_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteAmbulanceRepository, SqliteSpaceRepository,
};
use wardhub_app::services::ambulance_service::AmbulanceService;
use wardhub_app::services::space_service::SpaceService;

use crate::config::Config;
use crate::shutdown::Drain;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url(),
        operation_timeout: config.database_timeout(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let space_repo = SqliteSpaceRepository::new(pool.clone()).with_timeout(db.operation_timeout());
    let ambulance_repo = SqliteAmbulanceRepository::new(pool).with_timeout(db.operation_timeout());

    // Services
    let space_service = SpaceService::new(space_repo);
    let ambulance_service = AmbulanceService::new(ambulance_repo);

    // HTTP
    let state = AppState::new(space_service, ambulance_service);
    let cors = wardhub_adapter_http_axum::cors::layer(config.server.cors_origins.as_slice())?;
    let app = wardhub_adapter_http_axum::router::build(state, cors);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "wardhubd listening");

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown::signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    match shutdown::serve_until_drained(server, signalled_rx, config.shutdown_grace()).await? {
        Drain::Completed => tracing::info!("server stopped, closing database"),
        Drain::DeadlineExceeded => tracing::warn!("forced shutdown, closing database"),
    }
    db.close().await;

    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?}: {err}, falling back to `info`");
        EnvFilter::new("info")
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
