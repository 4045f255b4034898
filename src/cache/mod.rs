//! Cache Module
//!
//! Provides a capacity-bounded in-memory cache with TTL expiration.

mod bounded;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use bounded::BoundedCache;
pub use stats::CacheStats;

pub(crate) use entry::CacheEntry;
pub(crate) use stats::StatsCounters;
pub(crate) use store::CacheStore;
