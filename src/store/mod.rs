//! Key-value store holding per-client records.
//!
//! # Data Flow
//! ```text
//! bookkeeping (last seen / session)
//!     → ClientStore::get / set / set_if_absent
//!     → redis.rs (production) or memory.rs (local runs, tests)
//! ```
//!
//! # Design Decisions
//! - Keys are client addresses; values are opaque strings
//! - No expiry: lifecycle belongs to the store itself
//! - Create-once records use `set_if_absent` so concurrent first requests agree

pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Errors raised by a store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// A string key-value store.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Fetch the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Store `value` only if `key` is unset. Returns whether the write happened.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError>;
}

/// Build the store selected by configuration.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn ClientStore>, StoreError> {
    match config.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.redis_url).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory client store; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
