//! Cache layer.
//!
//! Memoizes expensive graph queries behind a small byte-oriented [`Cache`]
//! trait with a Redis implementation for deployments and an in-memory
//! implementation for tests and local runs. Values are JSON on the wire.
//!
//! Cache failures never fail an enrichment request: reads degrade to a miss
//! and writes are best-effort, so an unreachable cache store only costs
//! latency.

pub mod keys;
pub mod memory;
pub mod redis;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use ses_common::Result;

pub use keys::{go_background_key, go_term_count_key, go_terms_key};
pub use memory::MemoryCache;
pub use redis::RedisCache;

/// Default TTL for cached graph query results: 24 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600 * 24;

/// Shared key/value store with per-entry TTL.
///
/// Writes are idempotent: concurrent callers recomputing the same key
/// overwrite each other with equivalent values, so no locking is needed.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Best-effort JSON read.
///
/// Store and decode failures are logged and reported as a miss so the
/// caller falls through to the live query path.
pub async fn get_json<T, C>(cache: &C, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    C: Cache + ?Sized,
{
    match cache.get(key).await {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "Discarding undecodable cache entry");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(key, error = %err, "Cache read failed, treating as miss");
            None
        }
    }
}

/// Get-or-compute.
///
/// On a hit the cached value is deserialized and returned without invoking
/// `compute`. On a miss `compute` runs, its result is stored with `ttl` and
/// returned. Compute errors propagate; cache errors are downgraded to the
/// miss path.
pub async fn cached<C, T, F, Fut>(cache: &C, key: &str, ttl: Duration, compute: F) -> Result<T>
where
    C: Cache + ?Sized,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(hit) = get_json(cache, key).await {
        tracing::debug!(key, "Cache hit");
        return Ok(hit);
    }

    let value = compute().await?;
    match serde_json::to_vec(&value) {
        Ok(bytes) => {
            if let Err(err) = cache.set(key, bytes, ttl).await {
                tracing::warn!(key, error = %err, "Cache write failed, serving uncached result");
            }
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Could not serialize value for caching");
        }
    }
    Ok(value)
}
