//! Render-ready snapshot of the player

use serde::{Deserialize, Serialize};

/// One rendered playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRow {
    /// 1-based position
    pub ordinal: usize,
    /// Display name
    pub name: String,
    /// Whether this is the current track
    pub active: bool,
}

/// Enabled/disabled state of each control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlState {
    pub play_pause: bool,
    pub previous: bool,
    pub next: bool,
    pub skip_forward: bool,
    pub clear: bool,
}

impl ControlState {
    /// Every control enabled or every control disabled
    pub fn all(enabled: bool) -> Self {
        Self {
            play_pause: enabled,
            previous: enabled,
            next: enabled,
            skip_forward: enabled,
            clear: enabled,
        }
    }

    /// Whether every transport control (play/pause, previous, next, skip) is disabled
    pub fn transport_disabled(&self) -> bool {
        !(self.play_pause || self.previous || self.next || self.skip_forward)
    }
}

/// Everything a front end needs to draw the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rows: Vec<PlaylistRow>,
    pub controls: ControlState,
    /// Name of the loaded track
    pub current_track_name: Option<String>,
    pub is_playing: bool,
    /// Elapsed time text, e.g. `1:05`
    pub elapsed: String,
    /// Duration text, `0:00` until known
    pub duration: String,
    /// Progress bar fill in percent
    pub progress_percent: Option<f64>,
}
