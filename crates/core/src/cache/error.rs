use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Snapshot persistence failed: {0}")]
    Persistence(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
