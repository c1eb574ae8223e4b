//! Queries over the `tracks` table

use crate::error::{Result, StorageError};
use bytes::Bytes;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tapedeck_core::types::{Track, TrackId};

/// Insert a track and return its generated key
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    payload: &[u8],
    added_at: i64,
) -> Result<TrackId> {
    let result = sqlx::query("INSERT INTO tracks (name, payload, added_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(payload)
        .bind(added_at)
        .execute(pool)
        .await?;

    Ok(TrackId::new(result.last_insert_rowid()))
}

/// Get all tracks in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query("SELECT id, name, payload, added_at FROM tracks ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(track_from_row).collect()
}

/// Number of stored tracks
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete every track in a single transaction, returning how many were removed
pub async fn delete_all(pool: &SqlitePool) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM tracks").execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(result.rows_affected())
}

fn track_from_row(row: &SqliteRow) -> Result<Track> {
    let id: TrackId = row
        .try_get("id")
        .map_err(|e| StorageError::CorruptRecord(e.to_string()))?;
    let payload: Vec<u8> = row
        .try_get("payload")
        .map_err(|e| StorageError::CorruptRecord(format!("track {}: {}", id, e)))?;

    Ok(Track {
        id,
        name: row
            .try_get("name")
            .map_err(|e| StorageError::CorruptRecord(format!("track {}: {}", id, e)))?,
        payload: Bytes::from(payload),
        added_at: row
            .try_get("added_at")
            .map_err(|e| StorageError::CorruptRecord(format!("track {}: {}", id, e)))?,
    })
}
