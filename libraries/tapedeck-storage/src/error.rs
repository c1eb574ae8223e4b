/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Schema creation error
    #[error("Schema error: {0}")]
    Schema(String),

    /// A stored row could not be turned into a track
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for tapedeck_core::TapedeckError {
    fn from(err: StorageError) -> Self {
        tapedeck_core::TapedeckError::storage(err.to_string())
    }
}
