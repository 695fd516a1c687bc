//! Error types for ftrie.

use thiserror::Error;

/// Result type alias using [`TrieError`]
pub type Result<T> = std::result::Result<T, TrieError>;

/// Errors surfaced by trie operations.
///
/// Queries report "no match" through `Option`/`0` return values, never
/// through this enum; only contract violations become errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// A caller-supplied parameter is outside its valid range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A structural operation was attempted on an immutable trie
    #[error("trie is immutable; construct it with `immutable: false` to allow mutation")]
    ImmutableViolation,
}

impl TrieError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TrieError::InvalidArgument(msg.into())
    }
}
