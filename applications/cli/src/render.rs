//! Plain-text rendering of the player view

use tapedeck_playback::{PlayerEvent, PlayerView};

/// Numbered playlist with the active row marked
pub fn render_playlist(view: &PlayerView) -> String {
    if view.rows.is_empty() {
        return "(playlist is empty)".to_string();
    }

    view.rows
        .iter()
        .map(|row| {
            let marker = if row.active { '>' } else { ' ' };
            format!("{} {:>3}. {}", marker, row.ordinal, row.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line status: state, track, elapsed / duration and progress
pub fn render_status(view: &PlayerView) -> String {
    let Some(name) = &view.current_track_name else {
        return "No track loaded".to_string();
    };

    let state = if view.is_playing { "Playing" } else { "Paused" };
    let mut line = format!("{}: {}  {} / {}", state, name, view.elapsed, view.duration);
    if let Some(percent) = view.progress_percent {
        line.push_str(&format!(" ({:.0}%)", percent));
    }
    line
}

/// Message worth showing for a player event
///
/// Clock and bookkeeping events are not shown.
pub fn describe_event(event: &PlayerEvent) -> Option<String> {
    match event {
        PlayerEvent::TrackLoaded { index, name, .. } => {
            Some(format!("Loaded {}. {}", index + 1, name))
        }
        PlayerEvent::StateChanged { is_playing: true } => Some("Playing".to_string()),
        PlayerEvent::StateChanged { is_playing: false } => Some("Paused".to_string()),
        PlayerEvent::Cleared => Some("Playlist cleared".to_string()),
        PlayerEvent::Error { message } => Some(format!("Error: {}", message)),
        PlayerEvent::PlaylistChanged { .. }
        | PlayerEvent::PositionUpdate { .. }
        | PlayerEvent::DurationChanged { .. } => None,
    }
}
