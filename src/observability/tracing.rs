//! Distributed tracing baggage.
//!
//! # Responsibilities
//! - Build a propagation context carrying the client's session id
//! - Inject it into outbound request headers (W3C `baggage`)
//! - Extract baggage members from incoming request headers
//!
//! # Design Decisions
//! - Baggage lives in a context built for one outbound call; the ambient
//!   context is never modified, so nothing needs detaching afterwards

use std::collections::HashMap;

use axum::http::HeaderMap;
use opentelemetry::baggage::BaggageExt;
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry::{Context, KeyValue};
use opentelemetry_sdk::propagation::BaggagePropagator;

/// Baggage key carrying the client session id.
pub const SESSION_ID_KEY: &str = "sessionId";

/// Baggage to attach to one outbound call.
#[derive(Debug, Clone, Default)]
pub struct OutboundBaggage {
    cx: Option<Context>,
}

impl OutboundBaggage {
    /// No baggage.
    pub fn none() -> Self {
        Self::default()
    }

    /// Baggage carrying `sessionId`.
    pub fn session(session_id: &str) -> Self {
        let cx = Context::new().with_baggage(vec![KeyValue::new(
            SESSION_ID_KEY,
            session_id.to_string(),
        )]);
        Self { cx: Some(cx) }
    }

    /// Header name/value pairs to add to the outbound request.
    pub fn headers(&self) -> HashMap<String, String> {
        let mut carrier = HashMap::new();
        if let Some(cx) = &self.cx {
            BaggagePropagator::new().inject_context(cx, &mut carrier);
        }
        carrier
    }
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Baggage members found in incoming request headers, sorted by key.
pub fn extract_baggage(headers: &HeaderMap) -> Vec<(String, String)> {
    let cx = BaggagePropagator::new().extract(&HeaderExtractor(headers));
    let mut members: Vec<(String, String)> = cx
        .baggage()
        .iter()
        .map(|(key, (value, _))| (key.to_string(), value.to_string()))
        .collect();
    members.sort();
    members
}
