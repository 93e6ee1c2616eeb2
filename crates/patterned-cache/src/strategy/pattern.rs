//! Pattern enum and dispatch.

use std::fmt;
use std::str::FromStr;

use super::{
    Collaborators, cache_aside, read_through, write_around, write_behind, write_through,
};
use crate::error::{ParsePatternError, Result};
use crate::options::SetConfiguration;
use crate::repository::traits::CacheValue;

/// Pattern enum - determines how set/get/delete compose cache and store calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Touch the cache only; persistence is the caller's job
    #[default]
    CacheAside,
    /// Writes go to the cache, read misses are filled from the store
    ReadThrough,
    /// Writes go to cache then store synchronously
    WriteThrough,
    /// Writes go to the cache, the store write runs detached
    WriteBehind,
    /// Writes go to the store only, reads fill the cache
    WriteAround,
}

impl Pattern {
    pub const ALL: [Self; 5] = [
        Self::CacheAside,
        Self::ReadThrough,
        Self::WriteThrough,
        Self::WriteBehind,
        Self::WriteAround,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CacheAside => "cache-aside",
            Self::ReadThrough => "read-through",
            Self::WriteThrough => "write-through",
            Self::WriteBehind => "write-behind",
            Self::WriteAround => "write-around",
        }
    }

    pub(crate) async fn set<V: CacheValue>(
        self,
        stores: &Collaborators<V>,
        key: &str,
        value: V,
        config: &SetConfiguration,
    ) -> Result<()> {
        match self {
            Self::CacheAside | Self::ReadThrough => {
                cache_aside::set(stores, key, &value, config).await
            }
            Self::WriteThrough => write_through::set(stores, key, &value, config).await,
            Self::WriteBehind => write_behind::set(stores, key, value, config).await,
            Self::WriteAround => write_around::set(stores, key, &value).await,
        }
    }

    pub(crate) async fn get<V: CacheValue>(
        self,
        stores: &Collaborators<V>,
        key: &str,
    ) -> Result<Option<V>> {
        match self {
            Self::CacheAside => cache_aside::get(stores, key).await,
            Self::ReadThrough | Self::WriteThrough | Self::WriteBehind | Self::WriteAround => {
                read_through::get(stores, self, key).await
            }
        }
    }

    pub(crate) async fn delete<V: CacheValue>(
        self,
        stores: &Collaborators<V>,
        key: &str,
    ) -> Result<()> {
        match self {
            Self::CacheAside | Self::ReadThrough => cache_aside::delete(stores, key).await,
            Self::WriteThrough => write_through::delete(stores, key).await,
            Self::WriteBehind => write_behind::delete(stores, key).await,
            Self::WriteAround => write_around::delete(stores, key).await,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == normalized)
            .ok_or_else(|| ParsePatternError(s.to_string()))
    }
}
