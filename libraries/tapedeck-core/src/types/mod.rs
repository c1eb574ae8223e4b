mod event;
mod handle;
mod ids;
mod track;

pub use event::TransportEvent;
pub use handle::MediaHandle;
pub use ids::{HandleId, TrackId};
pub use track::{AudioFile, Track, AUDIO_MEDIA_TYPE_PREFIX};
