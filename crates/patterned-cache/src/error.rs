//! Engine error types

use thiserror::Error;

/// Boxed error produced by a collaborator implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a [`Cacher`](crate::Cacher) implementation.
#[derive(Debug, Error)]
#[error("Cache error: {0}")]
pub struct CacheError(#[from] pub BoxError);

impl CacheError {
    /// Wrap any error (or message) produced by a cache backend.
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

/// Failure reported by a [`Persister`](crate::Persister) implementation.
#[derive(Debug, Error)]
#[error("Store error: {0}")]
pub struct StoreError(#[from] pub BoxError);

impl StoreError {
    /// Wrap any error (or message) produced by a durable store.
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

/// Errors surfaced by the facade and the patterns.
///
/// Collaborator failures are carried unchanged; the variant tells the caller
/// which side (cache or store) produced them.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("cacher is required")]
    MissingCacher,

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PatternError {
    /// True when the failure originated in the cacher.
    pub const fn is_cache(&self) -> bool {
        matches!(self, Self::Cache(_))
    }

    /// True when the failure originated in the persister.
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Unknown pattern name in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache pattern: {0}")]
pub struct ParsePatternError(pub String);

pub type Result<T> = std::result::Result<T, PatternError>;
