//! Cache Store Module
//!
//! The bounded map itself: capacity eviction and TTL cleanup over a HashMap.
//! Carries no locking of its own; `BoundedCache` wraps it in a `RwLock`.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, StatsCounters};

// == Cache Store ==
/// Capacity-bounded key/value storage with insertion-time expiry.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: StatsCounters,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Age at which entries are swept
    ttl: Duration,
    /// Sequence number handed to the next write
    next_seq: u64,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// A zero `capacity` yields a store that never holds anything.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: StatsCounters::new(),
            capacity,
            ttl,
            next_seq: 0,
        }
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Does not check age: an entry stays visible until a sweep reclaims it.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair, stamping it with the current time.
    ///
    /// Overwriting an existing key refreshes its timestamp and never evicts.
    /// A new key arriving at a full store first evicts the oldest entry.
    ///
    /// Returns the evicted key, if any.
    pub fn set(&mut self, key: String, value: V) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }

        let evicted = if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity
        {
            self.evict_oldest()
        } else {
            None
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(key, CacheEntry::new(value, seq));

        evicted
    }

    // == Keys ==
    /// Snapshot of the keys currently present, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Evict Oldest ==
    /// Removes the entry with the earliest write and returns its key.
    ///
    /// Equal timestamps go to the earlier write. Returns None on an empty store.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.eviction_rank())
            .map(|(key, _)| key.clone())?;

        self.entries.remove(&oldest);
        self.stats.record_eviction();
        debug!(key = %oldest, "evicted oldest entry at capacity");
        Some(oldest)
    }

    // == Cleanup Expired ==
    /// Removes every entry whose age is at least the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    // == Sweep ==
    /// One sweeper pass: `cleanup_expired`, counted as a sweep.
    pub fn sweep(&mut self) -> usize {
        self.stats.record_sweep();
        self.cleanup_expired()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
