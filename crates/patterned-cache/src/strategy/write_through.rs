//! Write-through: cache then store on every write.

use super::{Collaborators, Pattern};
use crate::error::Result;
use crate::observer::Suppression;
use crate::options::SetConfiguration;
use crate::repository::traits::{CacheValue, Persistence};

pub(super) async fn set<V: CacheValue>(
    stores: &Collaborators<V>,
    key: &str,
    value: &V,
    config: &SetConfiguration,
) -> Result<()> {
    stores.cacher.set(key, value, config).await?;

    let Persistence::Attached(persister) = &stores.persistence else {
        return Ok(());
    };

    if let Err(e) = persister.save(key, value).await {
        tracing::warn!(key, error = %e, "Store save failed, evicting cached value");
        // the cache must not outlive a failed store write
        if let Err(undo) = stores.cacher.delete(key).await {
            stores.suppress(Pattern::WriteThrough, Suppression::CompensationFailed, key, undo);
        }
        return Err(e.into());
    }

    Ok(())
}

/// A failed store delete after a successful cache delete is surfaced but not
/// compensated; the store keeps the stale value.
pub(super) async fn delete<V: CacheValue>(stores: &Collaborators<V>, key: &str) -> Result<()> {
    stores.cacher.delete(key).await?;

    if let Persistence::Attached(persister) = &stores.persistence {
        persister.delete(key).await?;
    }

    Ok(())
}
