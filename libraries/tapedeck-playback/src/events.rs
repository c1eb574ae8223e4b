//! Player Events
//!
//! Event-based communication for UI synchronization. The controller queues an
//! event whenever something a front end renders has changed; front ends pull
//! them with `PlaybackController::drain_events`.

use serde::{Deserialize, Serialize};
use tapedeck_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The in-memory playlist was rebuilt
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// A track was bound to the transport device
    TrackLoaded {
        /// Position in the playlist
        index: usize,
        /// Store key of the track
        track_id: TrackId,
        /// Display name
        name: String,
    },

    /// Playing/paused state changed
    StateChanged {
        /// Whether the device is playing
        is_playing: bool,
    },

    /// Position update (from device time updates and seeks)
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, if known
        duration_ms: Option<u64>,
    },

    /// The bound track's duration became known
    DurationChanged {
        /// Total track duration
        duration_ms: u64,
    },

    /// Every track was removed
    Cleared,

    /// A recoverable error occurred (storage or transport)
    Error {
        /// Error message
        message: String,
    },
}
