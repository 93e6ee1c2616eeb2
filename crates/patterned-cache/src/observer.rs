//! Hooks for errors the patterns swallow and for write-behind background work.

use std::fmt;

use crate::error::PatternError;
use crate::strategy::Pattern;

/// Why an error was not returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Cache read failed; treated as a miss
    CacheReadFallback,
    /// Writing a store value back into the cache failed
    BackfillFailed,
    /// Deleting a cache entry after a failed store write failed
    CompensationFailed,
    /// Detached store save failed
    BackgroundSaveFailed,
    /// Detached store delete failed
    BackgroundDeleteFailed,
}

impl fmt::Display for Suppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CacheReadFallback => "cache_read_fallback",
            Self::BackfillFailed => "backfill_failed",
            Self::CompensationFailed => "compensation_failed",
            Self::BackgroundSaveFailed => "background_save_failed",
            Self::BackgroundDeleteFailed => "background_delete_failed",
        };
        f.write_str(name)
    }
}

/// An error that was handled inside a pattern instead of surfaced.
#[derive(Debug)]
pub struct SuppressedError {
    pub kind: Suppression,
    pub pattern: Pattern,
    pub key: String,
    pub error: PatternError,
}

/// Receives every error a pattern swallows.
pub trait ErrorObserver: Send + Sync {
    fn observe(&self, suppressed: SuppressedError);
}

/// Default observer: logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ErrorObserver for TracingObserver {
    fn observe(&self, suppressed: SuppressedError) {
        let SuppressedError {
            kind,
            pattern,
            key,
            error,
        } = suppressed;

        match kind {
            Suppression::CacheReadFallback | Suppression::BackfillFailed => {
                tracing::warn!(%pattern, %kind, key = %key, error = %error, "Cache error ignored");
            }
            Suppression::CompensationFailed
            | Suppression::BackgroundSaveFailed
            | Suppression::BackgroundDeleteFailed => {
                tracing::error!(%pattern, %kind, key = %key, error = %error, "Store consistency error ignored");
            }
        }
    }
}

/// Store operation performed by a write-behind background task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundOp {
    Save,
    Delete,
}

/// Result of one write-behind background task, reported after any compensation ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundOutcome {
    pub op: BackgroundOp,
    pub key: String,
    pub succeeded: bool,
}

/// Notified when a write-behind background task finishes.
pub trait BackgroundListener: Send + Sync {
    fn on_complete(&self, outcome: BackgroundOutcome);
}
