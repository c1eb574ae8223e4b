/// Core error types for Tapedeck
use thiserror::Error;

/// Result type alias using `TapedeckError`
pub type Result<T> = std::result::Result<T, TapedeckError>;

/// Core error type for Tapedeck
#[derive(Error, Debug)]
pub enum TapedeckError {
    /// The persistence backend could not open, read, write or clear
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The transport device rejected an operation
    #[error("Transport error: {0}")]
    Transport(String),
}

impl TapedeckError {
    /// Create a storage unavailable error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether this error means the store could not be reached or written
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for TapedeckError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}
