//! Distributed cache store boundary.
//!
//! The shared tier of the cache is an external key/value store (memcached,
//! redis, or similar) reached through the [`CacheStore`] trait: byte-string
//! values, integer-seconds expiry, nothing else. Implementations are expected
//! to be internally thread-safe; [`TieredCache`](super::TieredCache) adds no
//! locking around them.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Errors reported by a [`CacheStore`] implementation.
///
/// These never escape the cache layer: the tiered cache logs them and treats
/// the operation as a miss.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store could not be reached or the operation failed in transit.
    #[error("Store error: {0}")]
    Store(String),
}

/// Capability trait for the distributed cache tier.
///
/// Implement this to back the cache with a shared store. An expiry of `0`
/// seconds means the entry never expires.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the raw bytes stored under `key`, if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key` with the given expiry in seconds
    /// (`0` = no expiry). Overwrites any existing entry.
    async fn set(&self, key: &str, value: Vec<u8>, expiry_secs: u32) -> Result<(), CacheError>;
}

struct StoredEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

/// In-process [`CacheStore`] implementation.
///
/// Stands in for the distributed tier in tests and in single-process
/// deployments that have no shared store. Honors per-entry expiry.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) => {
                    let expired = entry
                        .expires_at
                        .is_some_and(|deadline| Instant::now() >= deadline);
                    if !expired {
                        return Ok(Some(entry.value.clone()));
                    }
                }
            }
        }
        // Expired entry: evict it under the write lock.
        self.entries.write().await.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, expiry_secs: u32) -> Result<(), CacheError> {
        let expires_at = if expiry_secs == 0 {
            None
        } else {
            Some(Instant::now() + Duration::from_secs(u64::from(expiry_secs)))
        };
        self.entries
            .write()
            .await
            .insert(key.to_string(), StoredEntry { value, expires_at });
        Ok(())
    }
}
