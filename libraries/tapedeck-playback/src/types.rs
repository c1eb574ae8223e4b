//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Skip-forward step in seconds (default: 5.0)
    pub seek_step_secs: f64,

    /// Select the first track when files are added to an empty selection
    /// (default: true)
    pub auto_select_first: bool,
}

impl PlaybackConfig {
    /// Skip-forward step as a duration; invalid steps fall back to zero
    pub fn seek_step(&self) -> Duration {
        Duration::try_from_secs_f64(self.seek_step_secs).unwrap_or_default()
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            auto_select_first: true,
        }
    }
}

/// Result of a clear request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearOutcome {
    /// The user confirmed and every track was removed
    Cleared,

    /// The user declined; nothing changed
    Declined,
}
