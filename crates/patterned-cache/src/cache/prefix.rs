//! Key namespacing applied inside collaborator implementations.

/// Prefix applied to every key a collaborator stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Keys are stored as given
    #[default]
    None,
    /// Keys are stored as `{name}.{key}`
    Named(String),
}

impl KeyPrefix {
    /// Build a prefix from a namespace name. The name is lower-cased; an
    /// empty name means no prefix.
    pub fn named(name: &str) -> Self {
        if name.is_empty() {
            Self::None
        } else {
            Self::Named(name.to_lowercase())
        }
    }

    pub fn apply(&self, key: &str) -> String {
        match self {
            Self::None => key.to_string(),
            Self::Named(name) => format!("{name}.{key}"),
        }
    }

    /// Reverse [`apply`](Self::apply). Returns `None` for keys outside this namespace.
    pub fn strip<'a>(&self, stored: &'a str) -> Option<&'a str> {
        match self {
            Self::None => Some(stored),
            Self::Named(name) => stored
                .strip_prefix(name.as_str())
                .and_then(|rest| rest.strip_prefix('.')),
        }
    }
}
