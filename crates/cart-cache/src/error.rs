//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// A stored record is not well-formed JSON for the requested type,
    /// or a value could not be serialized.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl CacheError {
    /// Whether this error came from a malformed record rather than the medium.
    pub fn is_parse(&self) -> bool {
        matches!(self, CacheError::Parse(_))
    }
}
