//! Catalog HTTP server.

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::model::AlbumTable;

/// Settings for the mock catalog.
#[derive(Debug, Clone)]
pub struct CatalogServiceConfig {
    /// Lower bound of the delay injected by `error=remoteLatency`.
    pub latency_min_ms: u64,
    /// Upper bound (inclusive).
    pub latency_max_ms: u64,
}

impl Default for CatalogServiceConfig {
    fn default() -> Self {
        Self {
            latency_min_ms: 2_000,
            latency_max_ms: 6_000,
        }
    }
}

/// State shared by catalog handlers.
#[derive(Clone)]
pub struct CatalogState {
    pub albums: AlbumTable,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
}

impl CatalogState {
    pub fn new(config: CatalogServiceConfig) -> Self {
        Self {
            albums: AlbumTable::seeded(),
            latency_min_ms: config.latency_min_ms,
            latency_max_ms: config.latency_max_ms,
        }
    }
}

/// The mock catalog service.
pub struct CatalogServer {
    router: Router,
}

impl CatalogServer {
    pub fn new(config: CatalogServiceConfig) -> Self {
        let state = CatalogState::new(config);
        let router = Router::new()
            .route("/albums", get(handlers::list_albums).post(handlers::post_album))
            .route("/albums/{id}", get(handlers::get_album))
            .with_state(state)
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// The router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %listener.local_addr()?, "Catalog server starting");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;
        tracing::info!("Catalog server stopped");
        Ok(())
    }
}
