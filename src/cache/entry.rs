//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value plus the moment of its most recent write.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was last written
    pub inserted_at: Instant,
    /// Store-wide write sequence, breaks ties between equal timestamps
    pub seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V, seq: u64) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            seq,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` is expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    /// Ordering key used when choosing the oldest entry.
    pub(crate) fn eviction_rank(&self) -> (Instant, u64) {
        (self.inserted_at, self.seq)
    }
}
