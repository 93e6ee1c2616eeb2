//! Per-call set options.

use std::time::Duration;

/// Resolved options for a single cache write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetConfiguration {
    ttl: Option<Duration>,
}

impl SetConfiguration {
    /// Base configuration carrying the engine-level default TTL.
    pub fn with_default_ttl(ttl: Option<Duration>) -> Self {
        let mut config = Self::default();
        config.set_ttl(ttl);
        config
    }

    /// Fold `options` over `base`, left to right. Later options win.
    pub fn resolve(base: Self, options: &[SetOption]) -> Self {
        options.iter().fold(base, |mut config, option| {
            option.apply(&mut config);
            config
        })
    }

    /// Time to live for the entry. `None` means the store's default or no expiry.
    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn set_ttl(&mut self, ttl: Option<Duration>) {
        // zero means unset
        self.ttl = ttl.filter(|ttl| !ttl.is_zero());
    }
}

/// A single mutation of a [`SetConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOption {
    /// Override the TTL for this write.
    Ttl(Duration),
}

impl SetOption {
    /// Override the engine-level default TTL for one write.
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self::Ttl(ttl)
    }

    /// Apply this option to `config`.
    pub fn apply(&self, config: &mut SetConfiguration) {
        match self {
            Self::Ttl(ttl) => config.set_ttl(Some(*ttl)),
        }
    }
}
