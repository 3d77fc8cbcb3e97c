pub mod api; // HTTP surface
pub mod config;
pub mod intelligence; // Risk scoring + alert rules
pub mod models;
pub mod monitoring; // Pipeline orchestration + storage
pub mod trends; // Longitudinal analytics

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::api::{start_api_server, ApiContext, ServerError};
use crate::config::{ConfigError, ServerConfig};
use crate::intelligence::RiskScorer;
use crate::monitoring::{MemoryStore, MonitoringService};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Wire scorer, store and service for `config`.
pub fn build_service(config: &ServerConfig) -> MonitoringService {
    let scorer = Arc::new(RiskScorer::initialize(&config.model_dir));
    MonitoringService::new(scorer, Arc::new(MemoryStore::new()))
}

/// Run the server until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServerConfig::from_env()?;
    let service = Arc::new(build_service(&config));

    let mut server = start_api_server(ApiContext::new(service), config.bind_addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    server.shutdown();
    server.stopped().await;
    Ok(())
}
