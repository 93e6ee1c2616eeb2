//! Write-behind: the cache write is synchronous, the store write is detached.
//!
//! Background tasks are spawned on the current tokio runtime with no join
//! handle kept, no bound on how many are in flight, and no ordering between
//! them. Dropping the caller's future does not cancel them.

use super::{Collaborators, Pattern};
use crate::error::Result;
use crate::observer::{BackgroundOp, BackgroundOutcome, Suppression};
use crate::options::SetConfiguration;
use crate::repository::traits::{CacheValue, Persistence};

pub(super) async fn set<V: CacheValue>(
    stores: &Collaborators<V>,
    key: &str,
    value: V,
    config: &SetConfiguration,
) -> Result<()> {
    stores.cacher.set(key, &value, config).await?;

    let Persistence::Attached(persister) = &stores.persistence else {
        return Ok(());
    };

    let persister = persister.clone();
    let stores = stores.clone();
    let key = key.to_string();

    tokio::spawn(async move {
        let succeeded = match persister.save(&key, &value).await {
            Ok(()) => true,
            Err(e) => {
                stores.suppress(Pattern::WriteBehind, Suppression::BackgroundSaveFailed, &key, e);
                if let Err(undo) = stores.cacher.delete(&key).await {
                    stores.suppress(Pattern::WriteBehind, Suppression::CompensationFailed, &key, undo);
                }
                false
            }
        };

        stores.notify(BackgroundOutcome {
            op: BackgroundOp::Save,
            key,
            succeeded,
        });
    });

    Ok(())
}

pub(super) async fn delete<V: CacheValue>(stores: &Collaborators<V>, key: &str) -> Result<()> {
    stores.cacher.delete(key).await?;

    let Persistence::Attached(persister) = &stores.persistence else {
        return Ok(());
    };

    let persister = persister.clone();
    let stores = stores.clone();
    let key = key.to_string();

    tokio::spawn(async move {
        let succeeded = match persister.delete(&key).await {
            Ok(()) => true,
            Err(e) => {
                stores.suppress(Pattern::WriteBehind, Suppression::BackgroundDeleteFailed, &key, e);
                false
            }
        };

        stores.notify(BackgroundOutcome {
            op: BackgroundOp::Delete,
            key,
            succeeded,
        });
    });

    Ok(())
}
