/// Core traits for Tapedeck
use crate::error::Result;
use crate::types::{AudioFile, MediaHandle, Track, TrackId, TransportEvent};
use async_trait::async_trait;
use std::time::Duration;

/// Playlist store trait
///
/// Implementers persist track records in insertion order. All operations are
/// asynchronous so large payload writes never block the caller's event loop.
///
/// Backend failures (open, read, write, clear) are reported as
/// [`TapedeckError::StorageUnavailable`](crate::TapedeckError::StorageUnavailable).
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Persist a new track
    ///
    /// Returns `Ok(None)` without writing anything when the file's media type
    /// is not an audio type.
    async fn add_track(&self, file: AudioFile) -> Result<Option<TrackId>>;

    /// Get all tracks in insertion order
    async fn list_tracks(&self) -> Result<Vec<Track>>;

    /// Delete every track
    async fn clear_all(&self) -> Result<()>;
}

/// Listener invoked for every transport event
pub type TransportListener = Box<dyn FnMut(TransportEvent) + Send>;

/// Transport device trait
///
/// A thin wrapper around the platform's media playback primitive. The
/// playback controller depends only on this interface.
pub trait TransportDevice: Send {
    /// Bind a playable resource, replacing any previous binding
    ///
    /// The position resets to zero and the duration becomes unknown until the
    /// device reports `MetadataLoaded`.
    fn bind(&mut self, handle: MediaHandle);

    /// Drop the current binding
    fn unbind(&mut self);

    /// Start or resume playback
    ///
    /// # Errors
    /// Returns an error if the platform refuses to start playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Whether playback is paused (true when nothing is bound)
    fn is_paused(&self) -> bool;

    /// Whether a resource is bound
    fn is_bound(&self) -> bool;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Move the playback position
    fn set_position(&mut self, position: Duration);

    /// Duration of the bound resource, `None` until metadata is loaded
    fn duration(&self) -> Option<Duration>;

    /// Register a listener for transport events
    fn subscribe(&mut self, listener: TransportListener);
}

/// Yes/no gate in front of destructive operations
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Ask the user; `true` means the user agreed
    async fn confirm(&self, message: &str) -> bool;
}

/// A fixed answer, for scripted front ends and tests
#[async_trait]
impl Confirmation for bool {
    async fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_answers_confirm_as_given() {
        assert!(true.confirm("Clear the playlist?").await);
        assert!(!false.confirm("Clear the playlist?").await);
    }
}
