/// CLI error types
use tapedeck_core::TapedeckError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    InvalidCommand(String),

    #[error("Cannot read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Player(#[from] TapedeckError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tapedeck_storage::StorageError> for CliError {
    fn from(err: tapedeck_storage::StorageError) -> Self {
        // StorageError -> TapedeckError -> CliError
        CliError::Player(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
