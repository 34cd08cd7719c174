//! Merchflow Cache - cache-aside layer with swappable backends
//!
//! A TTL-based read cache that sits in front of expensive store queries.
//! Two interchangeable backends implement [`CacheBackend`]:
//!
//! - [`MemoryCache`]: in-process, invisible to other processes, lost on restart
//! - [`RedisCache`]: shared across processes, survives process restarts
//!
//! The backend is chosen once at process startup and held immutably for the
//! process lifetime; there is no hot-swapping.
//!
//! # Failure Policy
//!
//! Cache failures degrade performance, never correctness or availability.
//! [`CacheService`] converts every backend error on reads (including
//! deserialization failures) into a miss, and swallows backend errors on
//! writes after reporting them to the tracing sink. Callers never see a
//! cache-backend failure.

pub mod error;
pub mod memory;
pub mod redis;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use self::redis::RedisCache;

/// Default TTLs
pub mod ttl {
    use std::time::Duration;

    /// Applied when the caller does not specify a TTL
    pub const DEFAULT: Duration = Duration::from_secs(5 * 60);
}

/// Raw cache backend contract
///
/// Values are opaque byte payloads; an entry is never returned once its TTL
/// has elapsed. Key construction is the caller's responsibility.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch a value; `None` means absent or expired
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Store a value with an expiry
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;

    /// Delete a key
    async fn remove(&self, key: &str) -> CacheResult<()>;

    /// Check whether a live entry exists
    async fn exists(&self, key: &str) -> CacheResult<bool>;
}

/// Typed cache-aside service over a fixed backend
///
/// Serializes values as JSON and applies the failure policy described at the
/// crate level. Clone is cheap; all clones share the same backend.
#[derive(Clone)]
pub struct CacheService {
    backend: Arc<dyn CacheBackend>,
    default_ttl: Duration,
}

impl CacheService {
    /// Create a service with the default 5-minute TTL
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self::with_default_ttl(backend, ttl::DEFAULT)
    }

    /// Create a service with a custom default TTL
    pub fn with_default_ttl(backend: Arc<dyn CacheBackend>, default_ttl: Duration) -> Self {
        Self {
            backend,
            default_ttl,
        }
    }

    /// Fetch and deserialize a value; any failure is a miss
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = match self.backend.get(key).await {
            Ok(payload) => payload?,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_slice(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "cached payload failed to deserialize, treating as miss");
                None
            }
        }
    }

    /// Serialize and store a value; failures are logged and swallowed
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let payload = match serde_json::to_vec(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize value for cache");
                return;
            }
        };
        let ttl = ttl.unwrap_or(self.default_ttl);
        if let Err(e) = self.backend.set(key, payload, ttl).await {
            warn!(key, error = %e, "cache write failed");
        }
    }

    /// Delete a key; failures are logged and swallowed
    pub async fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key).await {
            warn!(key, error = %e, "cache remove failed");
        }
    }

    /// Check for a live entry; failures read as absent
    pub async fn exists(&self, key: &str) -> bool {
        match self.backend.exists(key).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(key, error = %e, "cache exists check failed");
                false
            }
        }
    }
}
