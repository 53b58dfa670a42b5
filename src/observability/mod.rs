//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handlers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → tracing.rs (baggage for downstream calls)
//!
//! Consumers:
//!     → Log aggregation (stdout or file, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, separate port)
//!     → Downstream services reading the `baggage` header
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;
