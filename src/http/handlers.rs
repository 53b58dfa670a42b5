//! Route handlers: `/health` and `/albums`.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::Instrument;

use crate::http::request::{client_key, AlbumsQuery, ErrorMode, UnknownErrorMode};
use crate::http::response::AlbumsError;
use crate::http::server::AppState;
use crate::observability::metrics::{self, HandlerTimer};
use crate::observability::tracing::OutboundBaggage;

/// Liveness probe.
pub async fn health() -> &'static str {
    metrics::record_health_check();
    "KERNEL OK"
}

/// Fetch albums from the catalog, or fail on request.
pub async fn albums(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AlbumsError> {
    let _timer = HandlerTimer::start();
    let client = client_key(&addr);
    let query = AlbumsQuery::from_pairs(pairs);

    // Parsed now for the metric label; rejected only after bookkeeping ran.
    let mode = ErrorMode::from_query(query.error.as_deref());
    let label = mode.as_ref().map_or("unknown", |m| m.label());

    let span = tracing::info_span!(
        "albums",
        client = %client,
        error_mode = label,
        session_id = tracing::field::Empty
    );
    let result = get_albums(&state, &client, mode).instrument(span).await;

    let status = match &result {
        Ok(response) => response.status(),
        Err(e) => e.status(),
    };
    metrics::record_albums_request(label, status.as_u16());
    result
}

async fn get_albums(
    state: &AppState,
    client: &str,
    mode: Result<ErrorMode, UnknownErrorMode>,
) -> Result<Response, AlbumsError> {
    tracing::info!("getting albums...");

    let visit = state.bookkeeper.record(client).await?;
    let baggage = match visit.session_id() {
        Some(id) => {
            tracing::Span::current().record("session_id", id);
            OutboundBaggage::session(id)
        }
        None => OutboundBaggage::none(),
    };

    match mode? {
        ErrorMode::None => {
            let albums = state.catalog.albums(&baggage).await?;
            Ok((StatusCode::OK, Json(albums)).into_response())
        }
        ErrorMode::NotFound => {
            tracing::warn!("intentionally getting 404");
            Ok(state.catalog.junk(&baggage).await?.into_response())
        }
        ErrorMode::InternalError => Err(AlbumsError::InjectedFault),
        ErrorMode::Remote401 => Ok(state
            .catalog
            .albums_with_error("remote401", &baggage)
            .await?
            .into_response()),
        ErrorMode::RemoteLatency => Ok(state
            .catalog
            .albums_with_error("remoteLatency", &baggage)
            .await?
            .into_response()),
    }
}
