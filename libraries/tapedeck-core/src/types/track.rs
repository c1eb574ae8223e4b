/// Track domain types
use crate::types::TrackId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Media types accepted into the playlist start with this prefix
pub const AUDIO_MEDIA_TYPE_PREFIX: &str = "audio/";

/// A file offered for the playlist, not yet persisted
///
/// Carries the media type the picker declared for it. Before it is saved the
/// only identity a file has is its position in the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// Display name (usually the file name)
    pub name: String,

    /// Declared media type, e.g. `audio/mpeg`
    pub media_type: String,

    /// Opaque audio payload
    pub payload: Bytes,
}

impl AudioFile {
    /// Create a new file entry
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }

    /// Whether the declared media type is an audio type
    pub fn is_audio(&self) -> bool {
        self.media_type.starts_with(AUDIO_MEDIA_TYPE_PREFIX)
    }
}

/// A persisted playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Store key
    pub id: TrackId,

    /// Display name
    pub name: String,

    /// Opaque audio payload
    pub payload: Bytes,

    /// When the track was added, in Unix epoch milliseconds
    pub added_at: i64,
}
