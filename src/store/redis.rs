//! Redis-backed store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use super::{ClientStore, StoreError};

/// Store backed by a shared Redis connection manager.
///
/// `ConnectionManager` is cheap to clone and reconnects on its own, so each
/// call works on a clone instead of locking a single connection.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis server at `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        tracing::info!(redis_url = %redis_url, "Connected to Redis");
        Ok(Self { manager })
    }
}

#[async_trait]
impl ClientStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut conn = self.manager.clone();
        let written: bool = conn.set_nx(key, value).await?;
        Ok(written)
    }
}
