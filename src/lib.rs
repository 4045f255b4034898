//! TTL Cache - A bounded in-process key/value cache
//!
//! Holds at most `capacity` entries, evicting the oldest write when full, and
//! sweeps entries older than the TTL from a background task.

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{BoundedCache, CacheStats};
pub use config::CacheConfig;
pub use error::CacheError;
