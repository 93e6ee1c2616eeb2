//! Write-around: writes bypass the cache, reads fill it lazily.

use super::Collaborators;
use crate::error::Result;
use crate::repository::traits::{CacheValue, Persistence};

pub(super) async fn set<V: CacheValue>(stores: &Collaborators<V>, key: &str, value: &V) -> Result<()> {
    let Persistence::Attached(persister) = &stores.persistence else {
        tracing::debug!(key, "No store attached, write-around set dropped");
        return Ok(());
    };

    if let Err(e) = persister.save(key, value).await {
        tracing::warn!(key, error = %e, "Write-around store save failed");
        return Err(e.into());
    }

    Ok(())
}

pub(super) async fn delete<V: CacheValue>(stores: &Collaborators<V>, key: &str) -> Result<()> {
    if let Persistence::Attached(persister) = &stores.persistence {
        if let Err(e) = persister.delete(key).await {
            tracing::warn!(key, error = %e, "Write-around store delete failed, cache left untouched");
            return Err(e.into());
        }
    }

    stores.cacher.delete(key).await?;
    Ok(())
}
