//! # Patterned Cache
//!
//! Facade binding one cacher, an optional persister and one [`Pattern`].
//! Every call is forwarded to the pattern; errors come back unchanged.

use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheSettings;
use crate::error::{PatternError, Result};
use crate::observer::{BackgroundListener, ErrorObserver, TracingObserver};
use crate::options::{SetConfiguration, SetOption};
use crate::repository::traits::{CacheValue, Persistence, SharedCacher, SharedPersister};
use crate::strategy::{Collaborators, Pattern};

/// Cache facade. Immutable after construction; clones share collaborators.
pub struct PatternedCache<V: CacheValue> {
    pattern: Pattern,
    stores: Collaborators<V>,
}

impl<V: CacheValue> PatternedCache<V> {
    pub fn builder() -> PatternedCacheBuilder<V> {
        PatternedCacheBuilder::default()
    }

    /// Store `value` under `key`. `options` override the default TTL for this call only.
    pub async fn set(&self, key: &str, value: V, options: &[SetOption]) -> Result<()> {
        let config = SetConfiguration::resolve(self.stores.backfill, options);
        self.pattern.set(&self.stores, key, value, &config).await
    }

    /// Read `key`. A value absent from every store is `Ok(None)`.
    pub async fn get(&self, key: &str) -> Result<Option<V>> {
        self.pattern.get(&self.stores, key).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.pattern.delete(&self.stores, key).await
    }

    /// Seed the cache with every entry of the store.
    ///
    /// Returns the number of entries read from the store; `0` without a persister.
    /// A cacher may skip entries it cannot encode (the Redis cacher does), so the
    /// count is an upper bound on what the cache holds.
    /// Store and cache failures are returned unchanged.
    pub async fn warm_up(&self) -> Result<usize> {
        let Persistence::Attached(persister) = &self.stores.persistence else {
            return Ok(0);
        };

        let entries = persister.select_all().await?;
        let count = entries.len();
        if count > 0 {
            self.stores.cacher.load(entries).await?;
        }

        tracing::info!(pattern = %self.pattern, count, "Cache warmed from store");
        Ok(count)
    }

    /// Close the cacher, then the persister. Both are attempted; the first error wins.
    pub async fn close(&self) -> Result<()> {
        let cache_result = self.stores.cacher.close().await.map_err(PatternError::from);
        let store_result = match &self.stores.persistence {
            Persistence::Attached(persister) => {
                persister.close().await.map_err(PatternError::from)
            }
            Persistence::Detached => Ok(()),
        };

        cache_result.and(store_result)
    }

    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub const fn has_persister(&self) -> bool {
        self.stores.persistence.is_attached()
    }

    pub const fn default_ttl(&self) -> Option<Duration> {
        self.stores.backfill.ttl()
    }
}

impl<V: CacheValue> Clone for PatternedCache<V> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern,
            stores: self.stores.clone(),
        }
    }
}

/// Builder for [`PatternedCache`]
pub struct PatternedCacheBuilder<V: CacheValue> {
    cacher: Option<SharedCacher<V>>,
    persister: Option<SharedPersister<V>>,
    pattern: Option<Pattern>,
    default_ttl: Option<Duration>,
    observer: Option<Arc<dyn ErrorObserver>>,
    listener: Option<Arc<dyn BackgroundListener>>,
}

impl<V: CacheValue> Default for PatternedCacheBuilder<V> {
    fn default() -> Self {
        Self {
            cacher: None,
            persister: None,
            pattern: None,
            default_ttl: None,
            observer: None,
            listener: None,
        }
    }
}

impl<V: CacheValue> PatternedCacheBuilder<V> {
    /// Required
    #[must_use]
    pub fn cacher(mut self, cacher: SharedCacher<V>) -> Self {
        self.cacher = Some(cacher);
        self
    }

    #[must_use]
    pub fn persister(mut self, persister: SharedPersister<V>) -> Self {
        self.persister = Some(persister);
        self
    }

    /// Defaults to [`Pattern::CacheAside`]
    #[must_use]
    pub const fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Engine-level TTL used when a call passes no TTL option
    #[must_use]
    pub const fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Defaults to [`TracingObserver`]
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn ErrorObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Notified when each write-behind background task finishes
    #[must_use]
    pub fn background_listener(mut self, listener: Arc<dyn BackgroundListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Apply pattern and default TTL from settings. An unset TTL in `settings`
    /// keeps whatever the builder already holds.
    #[must_use]
    pub fn with_settings(mut self, settings: &CacheSettings) -> Self {
        self.pattern = Some(settings.pattern);
        if let Some(ttl) = settings.default_ttl {
            self.default_ttl = Some(ttl);
        }
        self
    }

    /// # Errors
    ///
    /// Returns [`PatternError::MissingCacher`] when no cacher was supplied.
    pub fn build(self) -> Result<PatternedCache<V>> {
        let cacher = self.cacher.ok_or(PatternError::MissingCacher)?;
        let pattern = self.pattern.unwrap_or_default();

        let stores = Collaborators {
            cacher,
            persistence: Persistence::from_option(self.persister),
            backfill: SetConfiguration::with_default_ttl(self.default_ttl),
            observer: self
                .observer
                .unwrap_or_else(|| Arc::new(TracingObserver)),
            listener: self.listener,
        };

        tracing::debug!(
            %pattern,
            persister = stores.persistence.is_attached(),
            default_ttl = ?stores.backfill.ttl(),
            "Patterned cache built"
        );

        Ok(PatternedCache { pattern, stores })
    }
}
