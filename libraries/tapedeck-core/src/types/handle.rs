/// Playable handles derived from track payloads
use crate::types::{HandleId, Track, TrackId};
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A playable reference to one track's payload
///
/// This is what gets bound to a transport device. Clones share the revocation
/// flag, so a device still holding a clone can tell the handle was released.
#[derive(Debug, Clone)]
pub struct MediaHandle {
    id: HandleId,
    track_id: TrackId,
    name: String,
    payload: Bytes,
    revoked: Arc<AtomicBool>,
}

impl MediaHandle {
    /// Derive a handle from a persisted track
    pub fn new(id: HandleId, track: &Track) -> Self {
        Self {
            id,
            track_id: track.id,
            name: track.name.clone(),
            // Bytes clones are reference counted, the payload is not copied
            payload: track.payload.clone(),
            revoked: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle identifier
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Track this handle was derived from
    pub fn track_id(&self) -> TrackId {
        self.track_id
    }

    /// Track display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Audio payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Release the handle
    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::Release);
    }

    /// Whether the handle has been released
    pub fn is_revoked(&self) -> bool {
        self.revoked.load(Ordering::Acquire)
    }
}
