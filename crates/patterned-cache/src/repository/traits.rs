//! # Collaborator Traits
//!
//! Contracts for the cache and the durable store. Implementations can be
//! swapped for different backends (Redis, in-memory, mock, etc.)
//!
//! Absence is always `Ok(None)`; an `Err` means the operation itself failed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{CacheError, StoreError};
use crate::options::SetConfiguration;

/// Values the engine can carry. The engine never inspects them.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> CacheValue for T {}

// =============================================================================
// CACHER
// =============================================================================

/// Fast, possibly volatile key-value store.
#[async_trait]
pub trait Cacher<V: CacheValue>: Send + Sync {
    /// Store or replace `key`. `config.ttl()` of `None` means the cacher's own default.
    async fn set(&self, key: &str, value: &V, config: &SetConfiguration) -> Result<(), CacheError>;

    /// Read `key`
    async fn get(&self, key: &str) -> Result<Option<V>, CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Bulk seed with the cacher's default TTL
    async fn load(&self, entries: HashMap<String, V>) -> Result<(), CacheError>;

    /// Release backend resources
    async fn close(&self) -> Result<(), CacheError>;
}

// =============================================================================
// PERSISTER
// =============================================================================

/// Durable store, the source of truth.
#[async_trait]
pub trait Persister<V: CacheValue>: Send + Sync {
    /// Store or replace `key`
    async fn save(&self, key: &str, value: &V) -> Result<(), StoreError>;

    /// Read `key`
    async fn select_one(&self, key: &str) -> Result<Option<V>, StoreError>;

    /// Read every stored entry
    async fn select_all(&self) -> Result<HashMap<String, V>, StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Release backend resources
    async fn close(&self) -> Result<(), StoreError>;
}

pub type SharedCacher<V> = Arc<dyn Cacher<V>>;
pub type SharedPersister<V> = Arc<dyn Persister<V>>;

/// Whether a durable store is attached. Resolved once at construction.
pub enum Persistence<V: CacheValue> {
    Attached(SharedPersister<V>),
    Detached,
}

impl<V: CacheValue> Persistence<V> {
    pub fn from_option(persister: Option<SharedPersister<V>>) -> Self {
        persister.map_or(Self::Detached, Self::Attached)
    }

    pub const fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }
}

impl<V: CacheValue> Clone for Persistence<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Attached(persister) => Self::Attached(Arc::clone(persister)),
            Self::Detached => Self::Detached,
        }
    }
}
