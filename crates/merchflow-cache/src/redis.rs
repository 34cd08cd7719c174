//! Distributed cache backend over Redis
//!
//! Shared across processes and survives individual process restarts.
//! Connectivity failures surface as [`CacheError`] values, which the
//! cache-aside layer degrades to misses instead of propagating.

use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config as RedisConfig, Pool as RedisPool, Runtime};
use std::time::Duration;
use tracing::info;

use crate::{CacheBackend, CacheError, CacheResult};

/// Redis-backed distributed cache
pub struct RedisCache {
    pool: RedisPool,
}

impl RedisCache {
    /// Connect to Redis and verify the connection with a PING
    pub async fn connect(url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis: {}", mask_url(url));

        let cfg = RedisConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Connection(format!("Redis pool: {e}")))?;

        let mut conn = pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis: {e}")))?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::Connection(format!("Redis ping: {e}")))?;

        info!("Connected to Redis");

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut conn = self.pool.get().await?;
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.pool.get().await?;
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.pool.get().await?;
        let _: i32 = conn.del(key).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.pool.get().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }
}

fn mask_url(url: &str) -> String {
    // Replace any password between the scheme and '@' with ***
    if let (Some(scheme_end), Some(at_pos)) = (url.find("://"), url.find('@')) {
        let credentials = &url[scheme_end + 3..at_pos];
        if let Some(colon_pos) = credentials.find(':') {
            let user = &credentials[..colon_pos];
            return format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at_pos..]);
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_hides_password() {
        let masked = mask_url("redis://:secret@localhost:6379");
        assert!(!masked.contains("secret"));
        assert_eq!(masked, "redis://:***@localhost:6379");
    }

    #[test]
    fn mask_leaves_plain_urls_alone() {
        assert_eq!(mask_url("redis://localhost:6379"), "redis://localhost:6379");
    }
}
