//! Two-tier cache: a short-lived process-local tier in front of a shared
//! distributed store.
//!
//! Exchange rates are a read-heavy, freshness-tolerant workload. The local
//! tier absorbs bursts of repeated lookups for the same base currency within
//! a request fan-out; the distributed tier provides cross-process sharing and
//! the long retention that immutable historical entries need.
//!
//! The cache is fail-open throughout: store errors and corrupt payloads are
//! logged and degrade to a miss, so cache unavailability turns into "go fetch
//! from origin" and never into an error surfaced to the caller.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::store::CacheStore;

/// Fixed TTL of the process-local tier.
///
/// Applied to every local entry regardless of the caller's requested expiry:
/// the local tier is a read-through accelerator, not the authority on
/// freshness.
const LOCAL_TTL: Duration = Duration::from_secs(5 * 60);

/// Maximum number of entries in the process-local tier.
const LOCAL_CAPACITY: u64 = 1_000;

/// Options for [`TieredCache::set`].
///
/// `expiry` is the distributed-tier expiry; `None` means the entry never
/// expires there. The local tier always uses its own fixed TTL.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOptions {
    /// Distributed-tier expiry. `None` = no expiry.
    pub expiry: Option<Duration>,
}

impl SetOptions {
    /// Options with the given distributed-tier expiry.
    pub const fn with_expiry(expiry: Duration) -> Self {
        Self {
            expiry: Some(expiry),
        }
    }
}

/// A two-tier key/value cache for JSON-serializable values.
///
/// Explicitly constructed and dependency-injected; create one per process (it
/// is cheap to clone) and share it across tasks. Tests use isolated instances
/// backed by an [`InMemoryStore`](super::InMemoryStore).
#[derive(Clone)]
pub struct TieredCache {
    local: moka::future::Cache<String, Vec<u8>>,
    store: Arc<dyn CacheStore>,
}

impl TieredCache {
    /// Create a cache in front of the given distributed store.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        let local = moka::future::Cache::builder()
            .time_to_live(LOCAL_TTL)
            .max_capacity(LOCAL_CAPACITY)
            .build();
        Self { local, store }
    }

    /// Look up `key`, deserializing the payload into `T`.
    ///
    /// If `read_local` is set and the local tier holds the key, the value is
    /// served from there; otherwise the distributed store is queried. Any
    /// store or deserialization failure is logged and reported as a miss
    /// (`None`) — callers must treat all failures identically to a true miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, read_local: bool) -> Option<T> {
        let local_hit = if read_local {
            self.local.get(key).await
        } else {
            None
        };

        let data = match local_hit {
            Some(bytes) => bytes,
            None => match self.store.get(key).await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => return None,
                Err(e) => {
                    log::warn!("Unable to get cache item {}: {}", key, e);
                    return None;
                }
            },
        };

        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Unable to decode cached item {}: {}", key, e);
                None
            }
        }
    }

    /// Store `value` under `key`.
    ///
    /// The value is serialized once, written to the distributed store with the
    /// requested expiry, and unconditionally written to the local tier (which
    /// evicts on its own fixed clock). Failures are logged and swallowed;
    /// `set` never reports an error.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, options: SetOptions) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Unable to encode cache item {}: {}", key, e);
                return;
            }
        };

        let expiry_secs = options
            .expiry
            .map_or(0, |d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX));

        if let Err(e) = self.store.set(key, bytes.clone(), expiry_secs).await {
            log::warn!("Unable to set cache item {}: {}", key, e);
        }
        self.local.insert(key.to_string(), bytes).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::super::store::{CacheError, InMemoryStore};
    use super::*;

    /// Store that counts operations and can be told to fail.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore,
        gets: AtomicUsize,
        sets: AtomicUsize,
        fail: bool,
    }

    impl CountingStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn get_count(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        fn set_count(&self) -> usize {
            self.sets.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CacheStore for CountingStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CacheError::Store("store down".to_string()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: Vec<u8>, expiry_secs: u32) -> Result<(), CacheError> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CacheError::Store("store down".to_string()));
            }
            self.inner.set(key, value, expiry_secs).await
        }
    }

    #[tokio::test]
    async fn test_set_then_get_local() {
        let store = Arc::new(CountingStore::default());
        let cache = TieredCache::new(store.clone());

        cache.set("k", &vec![1, 2, 3], SetOptions::default()).await;
        let value: Option<Vec<i32>> = cache.get("k", true).await;
        assert_eq!(value, Some(vec![1, 2, 3]));

        // Served by the local tier: the store was never read.
        assert_eq!(store.get_count(), 0);
        assert_eq!(store.set_count(), 1);
    }

    #[tokio::test]
    async fn test_get_bypassing_local_reads_store() {
        let store = Arc::new(CountingStore::default());
        let cache = TieredCache::new(store.clone());

        cache.set("k", &"value", SetOptions::default()).await;
        let value: Option<String> = cache.get("k", false).await;
        assert_eq!(value, Some("value".to_string()));
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache = TieredCache::new(Arc::new(InMemoryStore::new()));
        let value: Option<String> = cache.get("missing", true).await;
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_store_error_is_a_miss() {
        let store = Arc::new(CountingStore::failing());
        let cache = TieredCache::new(store.clone());

        let value: Option<String> = cache.get("k", false).await;
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_survives_store_failure() {
        let store = Arc::new(CountingStore::failing());
        let cache = TieredCache::new(store);

        // Write fails in the distributed tier but still lands locally.
        cache.set("k", &"value", SetOptions::default()).await;
        let value: Option<String> = cache.get("k", true).await;
        assert_eq!(value, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_a_miss() {
        let store = Arc::new(InMemoryStore::new());
        store.set("k", b"not json".to_vec(), 0).await.unwrap();

        let cache = TieredCache::new(store);
        let value: Option<Vec<i32>> = cache.get("k", false).await;
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_expiry_is_forwarded_to_store() {
        let store = Arc::new(InMemoryStore::new());
        let cache = TieredCache::new(store.clone());

        cache
            .set("k", &"v", SetOptions::with_expiry(Duration::from_secs(60)))
            .await;
        // Entry exists in the store with an expiry set.
        assert!(store.get("k").await.unwrap().is_some());
    }
}
