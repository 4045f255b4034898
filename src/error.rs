//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only construction can fail. Lookups, writes and sweeps are total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity or TTL is zero
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No Tokio runtime to host the sweeper
    #[error("No Tokio runtime available to run the sweeper")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
