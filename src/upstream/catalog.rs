//! HTTP client for the catalog service.
//!
//! # Responsibilities
//! - Issue the GET requests the albums handler dispatches to
//! - Attach per-call baggage headers
//! - Hand back either parsed JSON or the raw status/body pair
//!
//! No timeouts and no retries: a hung catalog hangs the request.

use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::Value;
use url::Url;

use crate::observability::metrics;
use crate::observability::tracing::OutboundBaggage;

/// Raw upstream response handed back to the caller verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Client for the catalog service rooted at a base URL.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the catalog at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that sends through an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /albums`, parsed as JSON.
    pub async fn albums(&self, baggage: &OutboundBaggage) -> Result<Value, reqwest::Error> {
        let response = self.send("/albums", None, baggage).await?;
        response.json().await
    }

    /// `GET /junk`, a path the catalog does not serve.
    pub async fn junk(&self, baggage: &OutboundBaggage) -> Result<UpstreamResponse, reqwest::Error> {
        let response = self.send("/junk", None, baggage).await?;
        into_upstream(response).await
    }

    /// `GET /albums?error=<mode>`, asking the catalog to misbehave.
    pub async fn albums_with_error(
        &self,
        mode: &str,
        baggage: &OutboundBaggage,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let response = self.send("/albums", Some(mode), baggage).await?;
        into_upstream(response).await
    }

    async fn send(
        &self,
        path: &'static str,
        error_mode: Option<&str>,
        baggage: &OutboundBaggage,
    ) -> Result<reqwest::Response, reqwest::Error> {
        // Absolute paths replace any path on the base URL.
        let url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());

        let mut request = self.http.get(url);
        if let Some(mode) = error_mode {
            request = request.query(&[("error", mode)]);
        }
        for (name, value) in baggage.headers() {
            request = request.header(name, value);
        }

        match request.send().await {
            Ok(response) => {
                metrics::record_catalog_request(path, Some(response.status().as_u16()));
                tracing::debug!(path, status = %response.status(), "Catalog responded");
                Ok(response)
            }
            Err(e) => {
                metrics::record_catalog_request(path, None);
                tracing::error!(path, error = %e, "Catalog request failed");
                Err(e)
            }
        }
    }
}

async fn into_upstream(response: reqwest::Response) -> Result<UpstreamResponse, reqwest::Error> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;
    Ok(UpstreamResponse {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(CatalogClient::new("not a url").is_err());
    }

    #[test]
    fn test_base_url_kept() {
        let client = CatalogClient::new("http://catalog:9000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://catalog:9000/");
        assert_eq!(
            client.base_url().join("/junk").unwrap().as_str(),
            "http://catalog:9000/junk"
        );
    }
}
