//! Outbound calls to services this one depends on.

pub mod catalog;

pub use catalog::{CatalogClient, UpstreamResponse};
