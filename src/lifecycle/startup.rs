//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order: metrics, store, state
//! - Bind the listener last, so traffic only arrives once ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::{AppState, HttpServer};
use crate::observability::metrics;
use crate::store::{self, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("client store: {0}")]
    Store(#[from] StoreError),

    #[error("invalid catalog URL: {0}")]
    CatalogUrl(#[from] url::ParseError),

    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_addr(address: &str) -> Result<SocketAddr, StartupError> {
    address.parse().map_err(|source| StartupError::Address {
        address: address.to_string(),
        source,
    })
}

/// Connect the configured store and assemble handler state.
pub async fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let store = store::connect(&config.store).await?;
    Ok(AppState::from_config(config, store)?)
}

/// Start every subsystem and serve until `shutdown` fires.
pub async fn run(
    config: ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr = parse_addr(&config.observability.metrics_address)?;
        metrics::init_metrics(addr)?;
    }

    let state = build_state(&config).await?;
    let server = HttpServer::new(state);

    let addr = parse_addr(&config.listener.bind_address)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown).await?;
    Ok(())
}
