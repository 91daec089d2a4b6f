use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use service::Services;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise environment defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) if e.downcast_ref::<std::io::Error>().is_some() => {
            warn!(error = %e, "config file unavailable, using environment");
            let mut cfg = AppConfig::from_env();
            cfg.normalize_and_validate()
                .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            Ok(cfg)
        }
        Err(e) => Err(StartupError::InvalidConfig(e.to_string())),
    }
}

/// Construct the entity services over the configured storage backend.
pub async fn build_services(cfg: &AppConfig) -> Result<Services, StartupError> {
    let server_assigned = cfg.animal.server_assigned_arrival_time;
    let services = match cfg.storage.backend {
        StorageBackend::Memory => Services::in_memory(server_assigned),
        StorageBackend::File => {
            Services::file_backed(&cfg.storage.data_dir, server_assigned).await?
        }
        StorageBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            Services::with_database(db, server_assigned)
        }
    };
    info!(
        backend = ?cfg.storage.backend,
        server_assigned_arrival_time = server_assigned,
        "storage ready"
    );
    Ok(services)
}

pub fn build_app(services: Services) -> Router {
    routes::build_router(ServerState { services }, build_cors())
}

/// Public entry: load configuration, build the app and serve REST and the
/// `/rpc` JSON bridge on one listener.
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    let services = build_services(&cfg).await?;
    let app = build_app(services);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))?;
    info!(%addr, "starting slaughterhouse server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
