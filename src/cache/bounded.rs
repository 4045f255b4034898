//! Bounded Cache Module
//!
//! Thread-safe handle over `CacheStore` that owns the background sweeper.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweeper;

// == Bounded Cache ==
/// Capacity-bounded key/value cache with TTL expiration.
///
/// Lookups share a read lock; writes and sweeps take the write lock. A sweeper
/// task started by the constructor removes entries at least one TTL old, once
/// per TTL period, until [`shutdown`](Self::shutdown) is called or the cache is
/// dropped.
///
/// Share across tasks with `Arc<BoundedCache<V>>`.
///
/// # Example
/// ```ignore
/// let cache = BoundedCache::new(5, Duration::from_millis(10))?;
/// cache.set("key-01", 3).await;
/// assert_eq!(cache.get("key-01").await, Some(3));
/// cache.shutdown().await;
/// ```
pub struct BoundedCache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    /// Dropping this also stops the sweeper
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
    capacity: usize,
    ttl: Duration,
}

impl<V> BoundedCache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its sweeper.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if `capacity` or `ttl` is zero
    /// - `NoRuntime` if called outside a Tokio runtime
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::from_config(&CacheConfig::new(capacity, ttl))
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(RwLock::new(CacheStore::new(config.capacity, config.ttl)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweeper(store.clone(), config.ttl, shutdown_rx);

        info!(
            "Cache created: capacity={}, ttl={}ms",
            config.capacity,
            config.ttl.as_millis()
        );

        Ok(Self {
            store,
            shutdown_tx,
            sweeper: Mutex::new(Some(handle)),
            capacity: config.capacity,
            ttl: config.ttl,
        })
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, if present.
    pub async fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.store.read().await.get(key)
    }

    // == Set ==
    /// Stores `value` under `key`, refreshing its timestamp.
    ///
    /// A new key arriving at a full cache evicts the oldest entry first.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.store.write().await.set(key.into(), value);
    }

    // == Keys ==
    /// Snapshot of the keys currently present.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    // == Clean ==
    /// Removes expired entries now, outside the sweeper's schedule.
    ///
    /// Returns the number of entries removed. Not counted in `sweeps`.
    pub async fn clean(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    // == Shutdown ==
    /// Stops the sweeper and waits for it to exit.
    ///
    /// Once this returns no further automatic expiration happens; the cache
    /// keeps answering `get`/`set` as a plain bounded store. Calling it again
    /// is a no-op.
    pub async fn shutdown(&self) {
        let mut sweeper = self.sweeper.lock().await;
        let Some(handle) = sweeper.take() else {
            return;
        };

        self.shutdown_tx.send_replace(true);
        if let Err(err) = handle.await {
            warn!("TTL sweeper ended abnormally: {}", err);
        }
        info!("Cache shut down");
    }

    /// Returns true while the sweeper is alive.
    pub async fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
