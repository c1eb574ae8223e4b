//! Tapedeck Storage
//!
//! Embedded `SQLite` persistence for the playlist.
//!
//! A single `tracks` table keyed by an auto-generated integer holds every
//! persisted track (`name`, `payload` blob, `added_at` epoch milliseconds).
//! The database and its schema are created lazily on first use.
//!
//! # Example
//!
//! ```rust,no_run
//! use tapedeck_core::{AudioFile, PlaylistStore};
//! use tapedeck_storage::SqlitePlaylistStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // No I/O happens until the first operation
//! let store = SqlitePlaylistStore::new("sqlite://tapedeck.db");
//!
//! store
//!     .add_track(AudioFile::new("song.mp3", "audio/mpeg", vec![0u8; 64]))
//!     .await?;
//!
//! let tracks = store.list_tracks().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod tracks;

pub use error::StorageError;
pub use store::SqlitePlaylistStore;

use sqlx::sqlite::SqlitePool;

/// The one schema creation step
const CREATE_TRACKS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tracks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        payload BLOB NOT NULL,
        added_at INTEGER NOT NULL
    )
";

/// Create the `tracks` table if it does not exist yet
///
/// Safe to call any number of times.
///
/// # Errors
///
/// Returns an error if the statement fails
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(CREATE_TRACKS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| StorageError::Schema(e.to_string()))?;

    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tapedeck.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // Every connection to an in-memory database is its own database
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
