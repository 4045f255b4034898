//! Configuration Module
//!
//! Construction-time cache parameters, loadable from environment variables.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default maximum number of resident entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default time-to-live, also used as the sweep period.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache configuration parameters.
///
/// Immutable once a cache has been built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Expiration threshold and sweep period, serialized as milliseconds
    #[serde(rename = "ttl_ms", with = "duration_ms")]
    pub ttl: Duration,
}

impl CacheConfig {
    /// Creates a config from explicit values. Does not validate.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { capacity, ttl }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - TTL and sweep period in milliseconds (default: 300000)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_env_or(Self::default())
    }

    /// Like [`from_env`](Self::from_env), falling back to `defaults` instead.
    pub fn from_env_or(defaults: Self) -> Self {
        Self::from_lookup(|name| env::var(name).ok(), defaults)
    }

    fn from_lookup<F>(lookup: F, defaults: Self) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            capacity: lookup("CACHE_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            ttl: lookup("CACHE_TTL_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.ttl),
        }
    }

    /// Checks that both capacity and TTL are positive.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: DEFAULT_TTL,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_lookup_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[]), CacheConfig::default());
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_lookup_overrides() {
        let config = CacheConfig::from_lookup(
            lookup_from(&[("CACHE_CAPACITY", "5"), ("CACHE_TTL_MS", "10")]),
            CacheConfig::default(),
        );
        assert_eq!(config.capacity, 5);
        assert_eq!(config.ttl, Duration::from_millis(10));
    }

    #[test]
    fn test_config_lookup_unparsable_falls_back() {
        let config = CacheConfig::from_lookup(
            lookup_from(&[("CACHE_CAPACITY", "lots"), ("CACHE_TTL_MS", "-3")]),
            CacheConfig::default(),
        );
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_lookup_custom_defaults() {
        let defaults = CacheConfig::new(5, Duration::from_millis(10));
        let config =
            CacheConfig::from_lookup(lookup_from(&[("CACHE_CAPACITY", "8")]), defaults);
        assert_eq!(config, CacheConfig::new(8, Duration::from_millis(10)));
    }

    #[test]
    fn test_config_validate_rejects_zero() {
        let zero_capacity = CacheConfig::new(0, Duration::from_millis(10));
        assert!(matches!(
            zero_capacity.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));

        let zero_ttl = CacheConfig::new(5, Duration::ZERO);
        assert!(matches!(
            zero_ttl.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_serde_uses_milliseconds() {
        let config = CacheConfig::new(5, Duration::from_millis(250));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["capacity"], 5);
        assert_eq!(json["ttl_ms"], 250);

        let parsed: CacheConfig = serde_json::from_str(r#"{"capacity":7,"ttl_ms":1500}"#).unwrap();
        assert_eq!(parsed, CacheConfig::new(7, Duration::from_millis(1500)));
    }
}
