//! Playable handle bookkeeping
//!
//! Handles are derived from track payloads on first use and cached per track
//! for the life of the controller. They are revoked when their track leaves
//! the playlist or the playlist is cleared.

use std::collections::{HashMap, HashSet};
use tapedeck_core::{HandleId, MediaHandle, Track, TrackId};

/// Cache of live media handles keyed by track
#[derive(Debug, Default)]
pub struct HandleRegistry {
    next_id: u64,
    handles: HashMap<TrackId, MediaHandle>,
}

impl HandleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the live handle for a track, deriving one if needed
    pub fn handle_for(&mut self, track: &Track) -> MediaHandle {
        if let Some(handle) = self.handles.get(&track.id) {
            return handle.clone();
        }

        self.next_id += 1;
        let handle = MediaHandle::new(HandleId::new(self.next_id), track);
        tracing::debug!(handle = %handle.id(), track = %track.id, "Derived media handle");

        self.handles.insert(track.id, handle.clone());
        handle
    }

    /// Revoke and drop handles whose track is not in `keep`
    pub fn retain(&mut self, keep: &HashSet<TrackId>) {
        self.handles.retain(|id, handle| {
            let kept = keep.contains(id);
            if !kept {
                handle.revoke();
            }
            kept
        });
    }

    /// Revoke and drop every handle
    pub fn revoke_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.revoke();
        }
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handle is live
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
