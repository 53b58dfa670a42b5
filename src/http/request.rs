//! Request inputs for the albums handler.
//!
//! # Responsibilities
//! - Parse the `error` query parameter into an [`ErrorMode`]
//! - Derive the client record key from the peer address
//!
//! # Design Decisions
//! - The key is the peer IP without port, so reconnects map to one record
//! - An unrecognized `error` value is rejected rather than ignored
//! - A repeated `error` key resolves to its first value

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

/// Query parameters of `GET /albums`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlbumsQuery {
    pub error: Option<String>,
}

impl AlbumsQuery {
    /// Build from decoded query pairs, keeping the first `error` value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let error = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "error").then_some(value));
        Self { error }
    }
}

/// Failure mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// No `error` parameter: fetch albums normally.
    None,
    /// `error=404`: fetch a path the catalog does not serve.
    NotFound,
    /// `error=500`: fail locally without contacting the catalog.
    InternalError,
    /// `error=remote401`: ask the catalog to reject the request.
    Remote401,
    /// `error=remoteLatency`: ask the catalog to respond slowly.
    RemoteLatency,
}

/// An `error` value outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized error mode: {0}")]
pub struct UnknownErrorMode(pub String);

impl FromStr for ErrorMode {
    type Err = UnknownErrorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "404" => Ok(ErrorMode::NotFound),
            "500" => Ok(ErrorMode::InternalError),
            "remote401" => Ok(ErrorMode::Remote401),
            "remoteLatency" => Ok(ErrorMode::RemoteLatency),
            other => Err(UnknownErrorMode(other.to_string())),
        }
    }
}

impl ErrorMode {
    /// Parse an optional query value; absence means [`ErrorMode::None`].
    pub fn from_query(value: Option<&str>) -> Result<Self, UnknownErrorMode> {
        value.map_or(Ok(ErrorMode::None), str::parse)
    }

    /// Metric label.
    pub fn label(self) -> &'static str {
        match self {
            ErrorMode::None => "none",
            ErrorMode::NotFound => "404",
            ErrorMode::InternalError => "500",
            ErrorMode::Remote401 => "remote401",
            ErrorMode::RemoteLatency => "remoteLatency",
        }
    }
}

/// Key under which a client's record is stored.
pub fn client_key(addr: &SocketAddr) -> String {
    addr.ip().to_string()
}
