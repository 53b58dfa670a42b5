//! Catalog route handlers.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rand::Rng;
use serde_json::json;

use super::model::Album;
use super::server::CatalogState;
use crate::observability::metrics;
use crate::observability::tracing::extract_baggage;

/// Outcome of the auth check on `GET /albums`.
#[derive(Debug, PartialEq, Eq)]
enum Auth {
    Granted,
    Denied,
}

/// Inspect `error` parameters: `remote401` denies, `remoteLatency` stalls.
async fn check_auth(state: &CatalogState, params: &[(String, String)]) -> Auth {
    tracing::info!("Checking auth...");
    metrics::record_auth_attempt();

    for (key, value) in params {
        if key != "error" {
            continue;
        }
        match value.as_str() {
            "remote401" => {
                tracing::warn!("unknown user");
                return Auth::Denied;
            }
            "remoteLatency" => {
                let delay = state.pick_latency();
                tracing::info!(added_latency_ms = delay.as_millis() as u64, "Adding latency");
                tokio::time::sleep(delay).await;
            }
            _ => {}
        }
    }

    Auth::Granted
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// `GET /albums`
pub async fn list_albums(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let baggage = extract_baggage(&headers);
    if !baggage.is_empty() {
        tracing::info!(baggage = ?baggage, "Request baggage");
    }

    if check_auth(&state, &params).await == Auth::Denied {
        return message(StatusCode::UNAUTHORIZED, "unauthorized");
    }

    Json(state.albums.all()).into_response()
}

/// `GET /albums/{id}`
pub async fn get_album(State(state): State<CatalogState>, Path(id): Path<String>) -> Response {
    match state.albums.get(&id) {
        Some(album) => Json(album).into_response(),
        None => {
            tracing::warn!(id = %id, "unable to find album");
            message(StatusCode::NOT_FOUND, "row not found")
        }
    }
}

/// `POST /albums`
pub async fn post_album(State(state): State<CatalogState>, Json(album): Json<Album>) -> Response {
    if state.albums.insert(album.clone()) {
        tracing::info!(id = %album.id, "Album added");
        (StatusCode::CREATED, Json(album)).into_response()
    } else {
        message(StatusCode::CONFLICT, "album already exists")
    }
}

impl CatalogState {
    fn pick_latency(&self) -> Duration {
        let lo = self.latency_min_ms.min(self.latency_max_ms);
        let hi = self.latency_min_ms.max(self.latency_max_ms);
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}
