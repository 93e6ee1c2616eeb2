//! In-memory persister.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::KeyPrefix;
use crate::error::StoreError;
use crate::repository::traits::{CacheValue, Persister};

/// Durable-store stand-in backed by a map. Useful for tests and demos.
pub struct MemoryPersister<V> {
    entries: RwLock<HashMap<String, V>>,
    prefix: KeyPrefix,
}

impl<V: CacheValue> MemoryPersister<V> {
    pub fn new() -> Self {
        Self::with_prefix(KeyPrefix::None)
    }

    pub fn with_prefix(prefix: KeyPrefix) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            prefix,
        }
    }

    /// Create a persister pre-populated with `entries`.
    pub fn seeded(entries: impl IntoIterator<Item = (String, V)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
            prefix: KeyPrefix::None,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V: CacheValue> Default for MemoryPersister<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V: CacheValue> Persister<V> for MemoryPersister<V> {
    async fn save(&self, key: &str, value: &V) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(self.prefix.apply(key), value.clone());
        Ok(())
    }

    async fn select_one(&self, key: &str) -> Result<Option<V>, StoreError> {
        Ok(self.entries.read().await.get(&self.prefix.apply(key)).cloned())
    }

    async fn select_all(&self) -> Result<HashMap<String, V>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter_map(|(stored, value)| {
                self.prefix
                    .strip(stored)
                    .map(|key| (key.to_string(), value.clone()))
            })
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(&self.prefix.apply(key));
        Ok(())
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
