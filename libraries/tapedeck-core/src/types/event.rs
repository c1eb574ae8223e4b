/// Events raised by a transport device
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notifications a transport device sends to its subscribers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Playback reached the end of the bound resource
    Ended,

    /// The playback position moved
    TimeUpdate {
        /// Current position
        position: Duration,
    },

    /// The resource's metadata is available
    MetadataLoaded {
        /// Total duration of the resource
        duration: Duration,
    },

    /// Playback started or resumed
    PlayStarted,

    /// Playback paused
    Paused,
}
