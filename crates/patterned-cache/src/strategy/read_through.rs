//! Read with store fallback and cache backfill.
//!
//! Used by read-through, write-through, write-behind and write-around.

use super::{Collaborators, Pattern};
use crate::error::Result;
use crate::observer::Suppression;
use crate::repository::traits::{CacheValue, Persistence};

pub(super) async fn get<V: CacheValue>(
    stores: &Collaborators<V>,
    pattern: Pattern,
    key: &str,
) -> Result<Option<V>> {
    // Try cache first
    match stores.cacher.get(key).await {
        Ok(Some(value)) => {
            tracing::debug!(%pattern, key, "Cache hit");
            return Ok(Some(value));
        }
        Ok(None) => {
            tracing::debug!(%pattern, key, "Cache miss, falling back to store");
        }
        Err(e) => stores.suppress(pattern, Suppression::CacheReadFallback, key, e),
    }

    let Persistence::Attached(persister) = &stores.persistence else {
        return Ok(None);
    };

    let value = persister.select_one(key).await?;

    // Backfill on store hit
    if let Some(value) = &value {
        match stores.cacher.set(key, value, &stores.backfill).await {
            Ok(()) => tracing::debug!(%pattern, key, "Cache backfilled"),
            Err(e) => stores.suppress(pattern, Suppression::BackfillFailed, key, e),
        }
    }

    Ok(value)
}
