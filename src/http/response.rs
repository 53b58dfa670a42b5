//! Response handling for the albums service.
//!
//! # Responsibilities
//! - Map handler errors to HTTP status codes
//! - Relay catalog responses to the client without rewriting them
//!
//! # Design Decisions
//! - Every unanticipated failure is a bare 500; no structured error body
//! - Relayed responses keep the upstream status, body and content type

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::request::UnknownErrorMode;
use crate::store::StoreError;
use crate::upstream::UpstreamResponse;

/// Errors surfaced by the albums handler.
#[derive(Debug, Error)]
pub enum AlbumsError {
    /// Requested with `error=500`.
    #[error("Unknown exception encountered")]
    InjectedFault,

    #[error(transparent)]
    UnknownErrorMode(#[from] UnknownErrorMode),

    #[error("catalog request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("client store failed: {0}")]
    Store(#[from] StoreError),
}

impl AlbumsError {
    pub fn status(&self) -> StatusCode {
        match self {
            AlbumsError::UnknownErrorMode(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AlbumsError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Albums request failed");
            (status, "Internal Server Error").into_response()
        } else {
            tracing::warn!(error = %self, "Albums request rejected");
            (status, self.to_string()).into_response()
        }
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        if let Some(value) = self
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok())
        {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Bytes};

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_injected_fault_is_plain_500() {
        let response = AlbumsError::InjectedFault.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_unknown_mode_is_400() {
        let err: AlbumsError = UnknownErrorMode("teapot".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "unrecognized error mode: teapot");
    }

    #[tokio::test]
    async fn test_upstream_relayed_verbatim() {
        let upstream = UpstreamResponse {
            status: StatusCode::UNAUTHORIZED,
            content_type: Some("application/json; charset=utf-8".into()),
            body: Bytes::from_static(br#"{"message":"unauthorized"}"#),
        };
        let response = upstream.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
        assert_eq!(body_text(response).await, r#"{"message":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn test_upstream_without_content_type() {
        let upstream = UpstreamResponse {
            status: StatusCode::NOT_FOUND,
            content_type: None,
            body: Bytes::new(),
        };
        let response = upstream.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "");
    }
}
