//! # Cache Module
//!
//! [`Cacher`](crate::Cacher) implementations and key namespacing.

pub mod memory;
pub mod prefix;
#[cfg(feature = "redis")]
pub mod redis_client;

pub use memory::{MemoryCacher, MemoryCacherConfig};
pub use prefix::KeyPrefix;
#[cfg(feature = "redis")]
pub use redis_client::{RedisCacher, RedisCacherConfig};
