//! Storefront albums service.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────┐
//!                       │              ALBUMS SERVICE              │
//!    GET /albums        │  ┌────────┐   ┌─────────────┐            │
//!   ────────────────────┼─▶│  http  │──▶│ bookkeeping │──▶ store ──┼──▶ Redis
//!                       │  │handlers│   └─────────────┘            │
//!                       │  └───┬────┘                              │
//!                       │      │ error mode dispatch               │
//!                       │      ▼                                   │
//!   ◀───────────────────┼── upstream::CatalogClient ───────────────┼──▶ Catalog
//!                       │        (+ baggage: sessionId)            │
//!                       │                                          │
//!                       │  observability: logs, Prometheus :9090   │
//!                       └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use albums_store::config::{self, ServiceConfig};
use albums_store::lifecycle::{signals, startup, Shutdown};
use albums_store::observability::logging;

#[derive(Parser)]
#[command(name = "albums-store")]
#[command(about = "Storefront albums service", long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!("albums-store v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        catalog = %config.catalog.base_url,
        store = ?config.store.backend,
        bookkeeping = ?config.bookkeeping.mode,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let serve = startup::run(config, shutdown.subscribe());
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => result?,
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            serve.await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
