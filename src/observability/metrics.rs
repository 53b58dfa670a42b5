//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (handler latency, health checks, upstream calls)
//! - Expose Prometheus-compatible metrics endpoint on its own listener
//!
//! # Metrics
//! - `request_processing_seconds` (histogram): albums handler duration
//! - `health_checks_total` (counter): health check requests
//! - `albums_requests_total` (counter): albums requests by error mode, status
//! - `catalog_requests_total` (counter): outbound catalog calls by path, status
//! - `client_sessions_created_total` (counter): new session ids stored
//! - `catalog_auth_attempts_total` (counter): auth checks in the mock catalog

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const REQUEST_PROCESSING_SECONDS: &str = "request_processing_seconds";
pub const HEALTH_CHECKS_TOTAL: &str = "health_checks_total";
pub const ALBUMS_REQUESTS_TOTAL: &str = "albums_requests_total";
pub const CATALOG_REQUESTS_TOTAL: &str = "catalog_requests_total";
pub const CLIENT_SESSIONS_CREATED_TOTAL: &str = "client_sessions_created_total";
pub const CATALOG_AUTH_ATTEMPTS_TOTAL: &str = "catalog_auth_attempts_total";

/// Install the Prometheus recorder and serve it on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    describe();
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Install the Prometheus recorder without a listener and return a handle
/// that renders the current values.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe();
    Ok(handle)
}

fn describe() {
    describe_histogram!(
        REQUEST_PROCESSING_SECONDS,
        Unit::Seconds,
        "Time spent processing request"
    );
    describe_counter!(HEALTH_CHECKS_TOTAL, "Count of health checks");
    describe_counter!(ALBUMS_REQUESTS_TOTAL, "Albums requests by error mode and status");
    describe_counter!(CATALOG_REQUESTS_TOTAL, "Requests sent to the catalog service");
    describe_counter!(CLIENT_SESSIONS_CREATED_TOTAL, "Session ids created for new clients");
    describe_counter!(CATALOG_AUTH_ATTEMPTS_TOTAL, "The number of auth attempts");
}

pub fn record_health_check() {
    counter!(HEALTH_CHECKS_TOTAL).increment(1);
}

pub fn record_albums_request(mode: &'static str, status: u16) {
    counter!(ALBUMS_REQUESTS_TOTAL, "mode" => mode, "status" => status.to_string()).increment(1);
}

pub fn record_catalog_request(path: &'static str, status: Option<u16>) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    counter!(CATALOG_REQUESTS_TOTAL, "path" => path, "status" => status).increment(1);
}

pub fn record_session_created() {
    counter!(CLIENT_SESSIONS_CREATED_TOTAL).increment(1);
}

pub fn record_auth_attempt() {
    counter!(CATALOG_AUTH_ATTEMPTS_TOTAL).increment(1);
}

/// Observes `request_processing_seconds` when dropped, so every exit path of
/// the handler is timed, including early error returns.
#[must_use = "the timer records when dropped"]
pub struct HandlerTimer {
    start: Instant,
}

impl HandlerTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for HandlerTimer {
    fn drop(&mut self) {
        histogram!(REQUEST_PROCESSING_SECONDS).record(self.start.elapsed().as_secs_f64());
    }
}
