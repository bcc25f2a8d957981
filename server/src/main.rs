//! souq storefront API server.
//!
//! Startup sequence: configuration and store handles are fatal prerequisites;
//! migrations and seeding run inside the guarded bootstrap phase, which
//! degrades rather than aborts; only then does the listener bind.

use souq_bootstrap::{
    AccountSeeder, CatalogMigrator, CatalogSeeder, Config, IdentityMigrator, Orchestrator,
    Resources,
};
use souq_catalog::CatalogStore;
use souq_identity::PostgresAccountManager;
use souq_web::{AppState, build_router};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting souq storefront API");

    // Missing or malformed connection info aborts startup: a backend with no
    // store handle cannot safely serve traffic.
    let config = Config::from_env()?;
    let resources = Resources::connect(&config).await?;

    let catalog = CatalogStore::new(resources.catalog_pool.clone());
    let accounts = PostgresAccountManager::new(resources.identity_pool.clone());

    // Guarded bootstrap phase, run exactly once. Both terminal states let the
    // process continue; a degraded start serves with existing data.
    let report = Orchestrator::new(
        CatalogMigrator::new(catalog.clone()),
        IdentityMigrator::new(accounts.clone()),
        CatalogSeeder::new(catalog.clone()),
        AccountSeeder::new(accounts),
    )
    .with_step_timeout(config.bootstrap.step_timeout())
    .run()
    .await;

    if let Some(failure) = report.failure() {
        warn!(
            phase = %failure.phase,
            step = failure.step,
            "serving in degraded mode"
        );
    }

    let state = AppState::new(catalog, resources.baskets, Arc::new(report));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        }
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        }
    }
}
