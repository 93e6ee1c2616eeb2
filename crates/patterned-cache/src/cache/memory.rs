//! In-memory cacher using moka

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tokio::time::Instant;

use crate::cache::KeyPrefix;
use crate::error::CacheError;
use crate::options::SetConfiguration;
use crate::repository::traits::{CacheValue, Cacher};

/// Configuration for [`MemoryCacher`]
#[derive(Debug, Clone)]
pub struct MemoryCacherConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// TTL for writes that don't resolve one. `None` means no expiry.
    pub default_ttl: Option<Duration>,
    /// Key namespace
    pub prefix: KeyPrefix,
}

impl Default for MemoryCacherConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            default_ttl: None,
            prefix: KeyPrefix::None,
        }
    }
}

impl MemoryCacherConfig {
    pub const fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl).filter(|ttl| !ttl.is_zero());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.prefix = KeyPrefix::named(name);
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Thread-safe in-memory cacher
///
/// - per-entry TTL, falling back to the configured default
/// - bounded capacity with moka's eviction
/// - never fails
pub struct MemoryCacher<V> {
    cache: MokaCache<String, CacheEntry<V>>,
    config: MemoryCacherConfig,
}

impl<V: CacheValue> MemoryCacher<V> {
    pub fn new() -> Self {
        Self::with_config(MemoryCacherConfig::default())
    }

    pub fn with_config(config: MemoryCacherConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { cache, config }
    }

    /// Whether a live entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.lookup(&self.config.prefix.apply(key)).await.is_some()
    }

    async fn lookup(&self, stored: &str) -> Option<V> {
        let entry = self.cache.get(stored).await?;
        if entry.is_expired() {
            self.cache.invalidate(stored).await;
            return None;
        }
        Some(entry.value)
    }

    /// A TTL past the clock's range never expires.
    async fn insert(&self, stored: String, value: V, ttl: Option<Duration>) {
        let entry = CacheEntry {
            value,
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        };
        self.cache.insert(stored, entry).await;
    }
}

impl<V: CacheValue> Default for MemoryCacher<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V: CacheValue> Cacher<V> for MemoryCacher<V> {
    async fn set(&self, key: &str, value: &V, config: &SetConfiguration) -> Result<(), CacheError> {
        let ttl = config.ttl().or(self.config.default_ttl);
        self.insert(self.config.prefix.apply(key), value.clone(), ttl)
            .await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<V>, CacheError> {
        Ok(self.lookup(&self.config.prefix.apply(key)).await)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.cache.invalidate(&self.config.prefix.apply(key)).await;
        Ok(())
    }

    async fn load(&self, entries: HashMap<String, V>) -> Result<(), CacheError> {
        for (key, value) in entries {
            self.insert(self.config.prefix.apply(&key), value, self.config.default_ttl)
                .await;
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}
