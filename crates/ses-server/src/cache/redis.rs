//! Redis-backed cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use ses_common::{Result, SesError};

use super::Cache;

fn cache_err(err: redis::RedisError) -> SesError {
    SesError::Cache(err.to_string())
}

/// Shared Redis client.
///
/// The connection manager multiplexes a single connection and reconnects
/// transparently; clones are cheap handles onto the same manager.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect using a pre-assembled `redis://` / `rediss://` URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(cache_err)?;
        let conn = ConnectionManager::new(client).await.map_err(cache_err)?;
        tracing::info!("Redis connection established");
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(cache_err)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero expiry; clamp to the smallest legal TTL.
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await.map_err(cache_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await.map_err(cache_err)?;
        Ok(())
    }
}
