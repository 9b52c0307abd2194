//! Storage error types.

/// Errors that can occur during storage operations.
///
/// Lookups of missing ids are not errors here; the store reports those as
/// `bool`/`Option` no-ops.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An underlying filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the storage crate.
pub type Result<T> = std::result::Result<T, StorageError>;
