//! Cache-aside: the engine only ever talks to the cache.
//!
//! Read-through shares `set` and `delete` with this module.

use super::Collaborators;
use crate::error::Result;
use crate::options::SetConfiguration;
use crate::repository::traits::CacheValue;

pub(super) async fn set<V: CacheValue>(
    stores: &Collaborators<V>,
    key: &str,
    value: &V,
    config: &SetConfiguration,
) -> Result<()> {
    stores.cacher.set(key, value, config).await?;
    Ok(())
}

pub(super) async fn get<V: CacheValue>(stores: &Collaborators<V>, key: &str) -> Result<Option<V>> {
    let value = stores.cacher.get(key).await?;
    tracing::debug!(key, hit = value.is_some(), "Cache-aside read");
    Ok(value)
}

pub(super) async fn delete<V: CacheValue>(stores: &Collaborators<V>, key: &str) -> Result<()> {
    stores.cacher.delete(key).await?;
    Ok(())
}
