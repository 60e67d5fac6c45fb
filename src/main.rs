//!
//! Car-rental booking service: reservation workflow over REST.
//! Reads configuration from TOML file (~/.config/rental-booking/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use rental_booking::application::BookingService;
use rental_booking::config::AppConfig;
use rental_booking::infrastructure::database::migrator::Migrator;
use rental_booking::infrastructure::{HttpIdentityClient, HttpVehicleClient};
use rental_booking::infrastructure::SeaOrmReservationStore;
use rental_booking::shared::ShutdownCoordinator;
use rental_booking::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting rental booking service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Collaborator clients ───────────────────────────────────
    let timeout = app_cfg.collaborators.request_timeout();
    let identity = Arc::new(HttpIdentityClient::new(
        &app_cfg.collaborators.user_service_url,
        timeout,
    )?);
    let vehicles = Arc::new(HttpVehicleClient::new(
        &app_cfg.collaborators.vehicle_service_url,
        timeout,
    )?);
    info!(
        "Collaborators: users={}, vehicles={} (timeout {}s)",
        app_cfg.collaborators.user_service_url,
        app_cfg.collaborators.vehicle_service_url,
        app_cfg.collaborators.request_timeout_secs,
    );

    // ── Store and orchestrator ─────────────────────────────────
    let store = Arc::new(SeaOrmReservationStore::new(db.clone()));
    let service = Arc::new(BookingService::new(identity, vehicles, store));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new();
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(service, prometheus_handle);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let serve_result = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = serve_result {
        error!("REST API server error: {}", e);
    }

    // Perform final cleanup
    info!("Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Rental booking service shutdown complete");
    Ok(())
}
