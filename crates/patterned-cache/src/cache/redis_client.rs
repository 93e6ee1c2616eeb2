//! # Redis Cacher
//!
//! Redis-backed [`Cacher`] storing JSON-encoded values.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

use crate::cache::KeyPrefix;
use crate::error::CacheError;
use crate::options::SetConfiguration;
use crate::repository::traits::{CacheValue, Cacher};

/// Redis cacher configuration
#[derive(Debug, Clone)]
pub struct RedisCacherConfig {
    pub url: String,
    /// TTL for writes that don't resolve one. `None` means no expiry.
    pub default_ttl: Option<Duration>,
    pub prefix: KeyPrefix,
}

impl Default for RedisCacherConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            default_ttl: None,
            prefix: KeyPrefix::None,
        }
    }
}

impl RedisCacherConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
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

/// Redis cacher over a multiplexed connection manager
pub struct RedisCacher<V> {
    conn: ConnectionManager,
    config: RedisCacherConfig,
    _value: PhantomData<fn() -> V>,
}

impl<V> RedisCacher<V> {
    /// Connect to Redis
    pub async fn new(config: RedisCacherConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.url.as_str()).map_err(CacheError::new)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(CacheError::new)?;

        Ok(Self::with_connection(conn, config))
    }

    /// Build on an existing (possibly shared) connection manager
    pub const fn with_connection(conn: ConnectionManager, config: RedisCacherConfig) -> Self {
        Self {
            conn,
            config,
            _value: PhantomData,
        }
    }

    fn key(&self, key: &str) -> String {
        self.config.prefix.apply(key)
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl<V> Cacher<V> for RedisCacher<V>
where
    V: CacheValue + Serialize + DeserializeOwned,
{
    async fn set(&self, key: &str, value: &V, config: &SetConfiguration) -> Result<(), CacheError> {
        let json = serde_json::to_string(value).map_err(CacheError::new)?;
        let mut conn = self.conn.clone();

        match config.ttl().or(self.config.default_ttl) {
            Some(ttl) => conn
                .pset_ex::<_, _, ()>(self.key(key), json, ttl_millis(ttl))
                .await
                .map_err(CacheError::new),
            None => conn
                .set::<_, _, ()>(self.key(key), json)
                .await
                .map_err(CacheError::new),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<V>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(key)).await.map_err(CacheError::new)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(CacheError::new)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.del(self.key(key)).await.map_err(CacheError::new)?;
        Ok(())
    }

    /// Pipelined bulk write. Values that fail to encode are logged and skipped;
    /// the rest are still written.
    async fn load(&self, entries: HashMap<String, V>) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        for (key, value) in &entries {
            let json = match serde_json::to_string(value) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping unencodable value during load");
                    continue;
                }
            };
            match self.config.default_ttl {
                Some(ttl) => pipe.pset_ex(self.key(key), json, ttl_millis(ttl)).ignore(),
                None => pipe.set(self.key(key), json).ignore(),
            };
        }

        let mut conn = self.conn.clone();
        let _: () = pipe.query_async(&mut conn).await.map_err(CacheError::new)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        // the connection manager is shared by clones and closes when the last one drops
        Ok(())
    }
}
