use crate::{create_pool, error::StorageError, initialize_schema, tracks};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tapedeck_core::{
    error::Result,
    traits::PlaylistStore,
    types::{AudioFile, Track, TrackId},
};
use tokio::sync::OnceCell;

/// Playlist store backed by `SQLite`
///
/// The pool is opened and the schema created on the first operation. If that
/// fails the next operation tries again.
pub struct SqlitePlaylistStore {
    database_url: String,
    pool: OnceCell<SqlitePool>,
    schema: OnceCell<()>,
}

impl SqlitePlaylistStore {
    /// Create a store for the given database URL without touching the disk
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool: OnceCell::new(),
            schema: OnceCell::new(),
        }
    }

    /// Wrap an existing pool
    ///
    /// The schema is still created lazily on first use.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            database_url: String::new(),
            pool: OnceCell::new_with(Some(pool)),
            schema: OnceCell::new(),
        }
    }

    /// Whether the database has been opened
    pub fn is_open(&self) -> bool {
        self.pool.initialized()
    }

    /// Number of stored tracks
    pub async fn count_tracks(&self) -> Result<usize> {
        let pool = self.pool().await?;
        let count = tracks::count(pool).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Get the pool, opening the database and creating the schema on first use
    pub async fn pool(&self) -> std::result::Result<&SqlitePool, StorageError> {
        let pool = self
            .pool
            .get_or_try_init(|| async {
                let pool = create_pool(&self.database_url).await?;
                tracing::info!(url = %self.database_url, "Opened playlist store");
                Ok::<_, StorageError>(pool)
            })
            .await?;

        self.schema
            .get_or_try_init(|| initialize_schema(pool))
            .await?;

        Ok(pool)
    }
}

#[async_trait]
impl PlaylistStore for SqlitePlaylistStore {
    async fn add_track(&self, file: AudioFile) -> Result<Option<TrackId>> {
        if !file.is_audio() {
            tracing::debug!(
                name = %file.name,
                media_type = %file.media_type,
                "Skipping non-audio file"
            );
            return Ok(None);
        }

        let pool = self.pool().await?;
        let added_at = chrono::Utc::now().timestamp_millis();
        let id = tracks::create(pool, &file.name, &file.payload, added_at).await?;

        tracing::debug!(%id, name = %file.name, bytes = file.payload.len(), "Stored track");

        Ok(Some(id))
    }

    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let pool = self.pool().await?;
        Ok(tracks::get_all(pool).await?)
    }

    async fn clear_all(&self) -> Result<()> {
        let pool = self.pool().await?;
        let removed = tracks::delete_all(pool).await?;

        tracing::info!(removed, "Cleared playlist store");

        Ok(())
    }
}
