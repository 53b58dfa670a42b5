//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::bookkeeping::Bookkeeper;
use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::store::ClientStore;
use crate::upstream::CatalogClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub bookkeeper: Bookkeeper,
}

impl AppState {
    pub fn new(catalog: CatalogClient, bookkeeper: Bookkeeper) -> Self {
        Self {
            catalog,
            bookkeeper,
        }
    }

    /// Build state from validated configuration and a connected store.
    pub fn from_config(
        config: &ServiceConfig,
        store: Arc<dyn ClientStore>,
    ) -> Result<Self, url::ParseError> {
        let catalog = CatalogClient::new(&config.catalog.base_url)?;
        let bookkeeper = Bookkeeper::new(config.bookkeeping.mode, store);
        Ok(Self::new(catalog, bookkeeper))
    }
}

/// HTTP server for the albums service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around the given state.
    pub fn new(state: AppState) -> Self {
        tracing::info!(
            catalog = %state.catalog.base_url(),
            bookkeeping = ?state.bookkeeper.mode(),
            "Albums service configured"
        );
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/albums", get(handlers::albums))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
