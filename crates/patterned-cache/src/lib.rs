//! # Patterned Cache
//!
//! Cache-consistency engine sitting between a fast cache and a durable store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ set / get / delete
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PatternedCache                          │
//! │        (binds cacher, optional persister, one pattern)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Pattern                              │
//! │  CacheAside | ReadThrough | WriteThrough | WriteBehind |     │
//! │  WriteAround                                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │   Cacher                │   │   Persister (optional)       │
//! │  (memory, Redis, ...)   │   │   (source of truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `redis`: Enable the Redis cacher (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use patterned_cache::{MemoryCacher, MemoryPersister, Pattern, PatternedCache, SetOption};
//!
//! let cache = PatternedCache::builder()
//!     .cacher(Arc::new(MemoryCacher::new()))
//!     .persister(Arc::new(MemoryPersister::new()))
//!     .pattern(Pattern::WriteThrough)
//!     .default_ttl(Duration::from_secs(300))
//!     .build()?;
//!
//! cache.set("user:42", user, &[SetOption::with_ttl(Duration::from_secs(30))]).await?;
//! let user = cache.get("user:42").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod observer;
pub mod options;
pub mod repository;
pub mod strategy;

// Re-export commonly used types
pub use cache::{KeyPrefix, MemoryCacher, MemoryCacherConfig};
#[cfg(feature = "redis")]
pub use cache::{RedisCacher, RedisCacherConfig};
pub use config::CacheSettings;
pub use error::{BoxError, CacheError, ParsePatternError, PatternError, Result, StoreError};
pub use facade::{PatternedCache, PatternedCacheBuilder};
pub use observer::{
    BackgroundListener, BackgroundOp, BackgroundOutcome, ErrorObserver, SuppressedError,
    Suppression, TracingObserver,
};
pub use options::{SetConfiguration, SetOption};
pub use repository::{
    CacheValue, Cacher, MemoryPersister, Persister, SharedCacher, SharedPersister,
};
pub use strategy::Pattern;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
