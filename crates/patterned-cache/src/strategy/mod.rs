//! # Strategy Module
//!
//! Enum-dispatched cache-consistency patterns.
//!
//! ## Available Patterns
//!
//! | Pattern        | Set                         | Get                        | Delete                       |
//! |----------------|-----------------------------|----------------------------|------------------------------|
//! | `CacheAside`   | cache                       | cache                      | cache                        |
//! | `ReadThrough`  | cache                       | cache, store on miss, fill | cache                        |
//! | `WriteThrough` | cache, then store (undo)    | cache, store on miss, fill | cache, then store            |
//! | `WriteBehind`  | cache, store detached       | cache, store on miss, fill | cache, store detached        |
//! | `WriteAround`  | store                       | cache, store on miss, fill | store, then cache            |
//!
//! "undo" deletes the cache entry again when the store write fails.
//! "fill" writes a store hit back into the cache (best effort).
//!
//! ## Example
//!
//! ```rust,ignore
//! use patterned_cache::{Pattern, PatternedCache};
//!
//! let cache = PatternedCache::builder()
//!     .cacher(cacher)
//!     .persister(persister)
//!     .pattern(Pattern::WriteThrough)
//!     .build()?;
//!
//! cache.set("user:42", user, &[]).await?;
//! ```

mod cache_aside;
mod pattern;
mod read_through;
mod write_around;
mod write_behind;
mod write_through;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use pattern::Pattern;

use crate::error::PatternError;
use crate::observer::{
    BackgroundListener, BackgroundOutcome, ErrorObserver, SuppressedError, Suppression,
};
use crate::options::SetConfiguration;
use crate::repository::traits::{CacheValue, Persistence, SharedCacher};

/// Everything a pattern operates on, bound once by the facade.
pub(crate) struct Collaborators<V: CacheValue> {
    pub cacher: SharedCacher<V>,
    pub persistence: Persistence<V>,
    /// Configuration used for backfills (engine-level default TTL, no per-call options)
    pub backfill: SetConfiguration,
    pub observer: Arc<dyn ErrorObserver>,
    pub listener: Option<Arc<dyn BackgroundListener>>,
}

impl<V: CacheValue> Collaborators<V> {
    pub fn suppress(
        &self,
        pattern: Pattern,
        kind: Suppression,
        key: &str,
        error: impl Into<PatternError>,
    ) {
        self.observer.observe(SuppressedError {
            kind,
            pattern,
            key: key.to_string(),
            error: error.into(),
        });
    }

    pub fn notify(&self, outcome: BackgroundOutcome) {
        if let Some(listener) = &self.listener {
            listener.on_complete(outcome);
        }
    }
}

impl<V: CacheValue> Clone for Collaborators<V> {
    fn clone(&self) -> Self {
        Self {
            cacher: Arc::clone(&self.cacher),
            persistence: self.persistence.clone(),
            backfill: self.backfill,
            observer: Arc::clone(&self.observer),
            listener: self.listener.clone(),
        }
    }
}
