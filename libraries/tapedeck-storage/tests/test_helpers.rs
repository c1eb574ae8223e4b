//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior.

use sqlx::SqlitePool;
use tapedeck_core::types::AudioFile;
use tapedeck_storage::SqlitePlaylistStore;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub url: String,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a location for a new database file; nothing is opened yet
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let url = format!("sqlite://{}", db_path.display());

        Self {
            url,
            _temp_dir: temp_dir,
        }
    }

    /// A fresh store over this database file
    pub fn store(&self) -> SqlitePlaylistStore {
        SqlitePlaylistStore::new(self.url.clone())
    }

    /// An open pool with the schema applied
    pub async fn pool(&self) -> SqlitePool {
        let pool = tapedeck_storage::create_pool(&self.url)
            .await
            .expect("Failed to create pool");

        tapedeck_storage::initialize_schema(&pool)
            .await
            .expect("Failed to create schema");

        pool
    }
}

/// Test fixture: an mp3 with a recognizable payload
pub fn mp3(name: &str) -> AudioFile {
    AudioFile::new(name, "audio/mpeg", name.as_bytes().to_vec())
}

/// Test fixture: a file the picker declared as something other than audio
pub fn text_file(name: &str) -> AudioFile {
    AudioFile::new(name, "text/plain", b"not audio".to_vec())
}
