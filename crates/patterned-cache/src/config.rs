//! # Cache Configuration
//!
//! Environment-based configuration for building a [`PatternedCache`](crate::PatternedCache)
//! and its collaborators.

use std::env;
use std::time::Duration;

use crate::strategy::Pattern;

/// Engine and collaborator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Consistency pattern
    pub pattern: Pattern,

    /// Engine-level default TTL
    pub default_ttl: Option<Duration>,

    /// Key namespace applied by the collaborators
    pub namespace: Option<String>,

    /// Maximum entries held by the in-memory cacher
    pub memory_capacity: u64,

    /// Redis URL; `None` means use the in-memory cacher
    pub redis_url: Option<String>,

    /// Logging level
    pub log_level: String,

    /// Emit JSON logs
    pub log_json: bool,
}

impl CacheSettings {
    /// Load settings from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            pattern: lookup("CACHE_PATTERN").map_or(defaults.pattern, |raw| {
                raw.parse::<Pattern>().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, fallback = %defaults.pattern, "Ignoring CACHE_PATTERN");
                    defaults.pattern
                })
            }),

            default_ttl: lookup("CACHE_DEFAULT_TTL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),

            namespace: lookup("CACHE_NAMESPACE").filter(|v| !v.is_empty()),

            memory_capacity: lookup("CACHE_MEMORY_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.memory_capacity),

            redis_url: lookup("REDIS_URL").filter(|v| !v.is_empty()),

            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),

            log_json: lookup("LOG_JSON").is_some_and(|v| v == "true" || v == "1"),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            pattern: Pattern::CacheAside,
            default_ttl: None,
            namespace: None,
            memory_capacity: 10_000,
            redis_url: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}
