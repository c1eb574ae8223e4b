//! Playback controller - core orchestration
//!
//! Owns the playlist view, the current selection and the playing flag, and
//! drives the transport device. Persistence goes through the injected store.

use crate::{
    events::PlayerEvent,
    handles::HandleRegistry,
    time::{format_time, progress_percent},
    types::{ClearOutcome, PlaybackConfig},
    view::{ControlState, PlayerView, PlaylistRow},
};
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tapedeck_core::{
    AudioFile, Confirmation, PlaylistStore, Result, Track, TrackId, TransportDevice,
    TransportEvent,
};

/// Prompt shown before every track is deleted
pub const CLEAR_PROMPT: &str = "Remove every track from the playlist?";

/// Central playback control
///
/// Orchestrates:
/// - Playlist loading and adding (always re-read from the store after a write)
/// - Selection with wraparound navigation
/// - Transport control and seeking
/// - Auto-advance when a track ends
/// - Confirmed clearing
///
/// Invariant: `current_index` is `Some(i)` only with `i < playlist.len()`.
pub struct PlaybackController<S, D> {
    store: S,
    device: D,
    config: PlaybackConfig,

    // State
    playlist: Vec<Track>,
    current_index: Option<usize>,
    is_playing: bool,
    loaded: bool,

    handles: HandleRegistry,

    // Device notifications, queued by the subscription installed in `new`
    transport_events: Receiver<TransportEvent>,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<S, D> PlaybackController<S, D>
where
    S: PlaylistStore,
    D: TransportDevice,
{
    /// Create a controller and subscribe it to the device
    ///
    /// The playlist starts empty with no selection; call [`load`](Self::load)
    /// to read the persisted tracks.
    pub fn new(store: S, mut device: D, config: PlaybackConfig) -> Self {
        let (sender, transport_events) = mpsc::channel();
        device.subscribe(Box::new(move |event| {
            // The receiver only goes away with the controller
            let _ = sender.send(event);
        }));

        Self {
            store,
            device,
            config,
            playlist: Vec::new(),
            current_index: None,
            is_playing: false,
            loaded: false,
            handles: HandleRegistry::new(),
            transport_events,
            pending_events: Vec::new(),
        }
    }

    // ===== Playlist =====

    /// Rebuild the in-memory playlist from the store
    ///
    /// Resets the selection and the playing flag. On failure the previous
    /// state is left untouched.
    pub async fn load(&mut self) -> Result<()> {
        let tracks = match self.store.list_tracks().await {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load playlist");
                self.emit_error(e.to_string());
                return Err(e);
            }
        };

        if self.device.is_bound() {
            self.device.unbind();
        }
        self.handles.revoke_all();

        self.current_index = None;
        self.playlist = tracks;
        self.loaded = true;
        self.sync_playing_state();

        tracing::info!(tracks = self.playlist.len(), "Playlist loaded");
        self.emit_playlist_changed();

        Ok(())
    }

    /// Add a multi-file selection
    ///
    /// Non-audio entries are skipped. The playlist is re-read from the store
    /// afterwards, and if nothing was selected the first track is loaded
    /// (without playing). Returns how many files were accepted.
    pub async fn add_files(&mut self, files: Vec<AudioFile>) -> Result<usize> {
        let mut accepted = 0;
        let mut failure = None;

        for file in files {
            match self.store.add_track(file).await {
                Ok(Some(_)) => accepted += 1,
                Ok(None) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if accepted == 0 && failure.is_none() {
            return Ok(0);
        }

        if let Err(e) = self.refresh().await {
            // Nothing was changed in memory, so it still matches the last read
            self.emit_error(e.to_string());
            return Err(failure.unwrap_or(e));
        }

        if let Some(e) = failure {
            tracing::warn!(error = %e, accepted, "Adding files failed part way");
            self.emit_error(e.to_string());
            return Err(e);
        }

        if self.config.auto_select_first && self.current_index.is_none() {
            self.load_track(0);
        }

        Ok(accepted)
    }

    /// Re-read the store, keeping the selection when it is still valid
    async fn refresh(&mut self) -> Result<()> {
        let tracks = self.store.list_tracks().await?;

        let live: HashSet<TrackId> = tracks.iter().map(|t| t.id).collect();
        self.handles.retain(&live);

        let current_id = self.current_track().map(|t| t.id);
        self.playlist = tracks;
        self.loaded = true;
        self.current_index =
            current_id.and_then(|id| self.playlist.iter().position(|t| t.id == id));

        if current_id.is_some() && self.current_index.is_none() {
            self.device.unbind();
            self.sync_playing_state();
        }

        self.emit_playlist_changed();
        Ok(())
    }

    /// Delete every track after the user confirms
    ///
    /// Declining changes nothing. A storage failure leaves the playlist and
    /// selection as they were.
    pub async fn clear_all<C>(&mut self, confirmation: &C) -> Result<ClearOutcome>
    where
        C: Confirmation + ?Sized,
    {
        if !confirmation.confirm(CLEAR_PROMPT).await {
            tracing::debug!("Clear declined");
            return Ok(ClearOutcome::Declined);
        }

        if let Err(e) = self.store.clear_all().await {
            tracing::warn!(error = %e, "Failed to clear playlist");
            self.emit_error(e.to_string());
            return Err(e);
        }

        self.device.unbind();
        self.handles.revoke_all();
        self.playlist.clear();
        self.current_index = None;
        self.sync_playing_state();

        self.pending_events.push(PlayerEvent::Cleared);
        self.emit_playlist_changed();

        Ok(ClearOutcome::Cleared)
    }

    // ===== Playback Control =====

    /// Select a track and bind it to the device without playing
    ///
    /// Indices outside the playlist are ignored.
    pub fn load_track(&mut self, index: usize) {
        if self.bind_track(index) {
            self.sync_playing_state();
        }
    }

    /// Select and bind a track, leaving the playing flag to the caller
    ///
    /// Returns false for indices outside the playlist.
    fn bind_track(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.get(index) else {
            tracing::debug!(index, len = self.playlist.len(), "Ignoring out-of-range track");
            return false;
        };

        let handle = self.handles.handle_for(track);
        let event = PlayerEvent::TrackLoaded {
            index,
            track_id: track.id,
            name: track.name.clone(),
        };

        self.current_index = Some(index);
        self.device.bind(handle);
        self.pending_events.push(event);
        true
    }

    /// Select a track and start playing it
    ///
    /// Indices outside the playlist are ignored. Switching tracks while
    /// playing reports no pause in between.
    pub fn play_track(&mut self, index: usize) {
        if self.bind_track(index) {
            self.play();
        }
    }

    /// Start or resume playback, selecting the first track if needed
    pub fn play(&mut self) {
        if self.playlist.is_empty() {
            return;
        }

        if self.current_index.is_none() {
            self.bind_track(0);
        }

        if let Err(e) = self.device.play() {
            tracing::warn!(error = %e, "Transport refused to play");
            self.emit_error(e.to_string());
        }

        self.sync_playing_state();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.current_index.is_none() || !self.device.is_bound() {
            return;
        }

        self.device.pause();
        self.sync_playing_state();
    }

    /// Play when paused, pause when playing
    pub fn toggle_play_pause(&mut self) {
        if self.playlist.is_empty() {
            return;
        }

        if self.device.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Skip to the next track, wrapping to the first after the last
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let index = match self.current_index {
            Some(i) => (i + 1) % len,
            None => 0,
        };

        self.play_track(index);
    }

    /// Go to the previous track, wrapping to the last before the first
    pub fn previous(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let index = match self.current_index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };

        self.play_track(index);
    }

    /// Called when the device reports the end of the track
    ///
    /// The playlist loops: the last track is followed by the first.
    pub fn on_track_ended(&mut self) {
        self.next();
    }

    // ===== Seek =====

    /// Move forward by `offset`, never past the end of the track
    ///
    /// Ignored when nothing is loaded or the duration is not known yet.
    pub fn seek_relative(&mut self, offset: Duration) {
        if self.current_index.is_none() || !self.device.is_bound() {
            return;
        }
        let Some(duration) = self.device.duration() else {
            return;
        };

        let target = self.device.position().saturating_add(offset).min(duration);
        self.device.set_position(target);
        self.emit_position_update();
    }

    /// Move forward by the configured step (5 seconds by default)
    pub fn skip_forward(&mut self) {
        self.seek_relative(self.config.seek_step());
    }

    /// Seek to a fraction of the track (0.0 = start, 1.0 = end)
    ///
    /// Fractions outside `[0, 1]` are clamped. Ignored when nothing is loaded
    /// or the duration is not known yet.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if self.current_index.is_none() || !self.device.is_bound() || fraction.is_nan() {
            return;
        }
        let Some(duration) = self.device.duration().filter(|d| !d.is_zero()) else {
            return;
        };

        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.device.set_position(target);
        self.emit_position_update();
    }

    // ===== Transport events =====

    /// Apply every transport event received since the last call
    ///
    /// Returns the number of events handled.
    pub fn process_transport_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.transport_events.try_recv() {
            self.handle_transport_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply a single transport event
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            // Queued notifications can be stale, the device's state is not
            TransportEvent::PlayStarted | TransportEvent::Paused => self.sync_playing_state(),
            TransportEvent::Ended => self.on_track_ended(),
            TransportEvent::TimeUpdate { position } => {
                let duration = self.device.duration();
                self.pending_events.push(PlayerEvent::PositionUpdate {
                    position_ms: position.as_millis() as u64,
                    duration_ms: duration.map(|d| d.as_millis() as u64),
                });
            }
            TransportEvent::MetadataLoaded { duration } => {
                self.pending_events.push(PlayerEvent::DurationChanged {
                    duration_ms: duration.as_millis() as u64,
                });
            }
        }
    }

    // ===== State Queries =====

    /// Current selection (`None` when nothing is selected)
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.playlist.get(i))
    }

    /// Whether the device is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the persisted playlist has been read at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The in-memory playlist
    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Whether the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Number of live media handles
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    /// Configuration in use
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// The injected store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The injected device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the device, for front ends that drive its clock
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Enabled state of the controls
    ///
    /// Nothing is enabled until the persisted playlist has been read, and an
    /// empty playlist disables everything.
    pub fn controls(&self) -> ControlState {
        ControlState::all(self.loaded && !self.playlist.is_empty())
    }

    /// Snapshot for rendering
    pub fn view(&self) -> PlayerView {
        let rows = self
            .playlist
            .iter()
            .enumerate()
            .map(|(i, track)| PlaylistRow {
                ordinal: i + 1,
                name: track.name.clone(),
                active: self.current_index == Some(i),
            })
            .collect();

        let bound = self.current_index.is_some() && self.device.is_bound();
        let (position, duration) = if bound {
            (self.device.position(), self.device.duration())
        } else {
            (Duration::ZERO, None)
        };

        PlayerView {
            rows,
            controls: self.controls(),
            current_track_name: self.current_track().map(|t| t.name.clone()),
            is_playing: self.is_playing,
            elapsed: format_time(Some(position)),
            duration: format_time(duration),
            progress_percent: progress_percent(position, duration),
        }
    }

    // ===== Events =====

    /// Take all queued player events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether player events are queued
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_playing(&mut self, is_playing: bool) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            self.pending_events
                .push(PlayerEvent::StateChanged { is_playing });
        }
    }

    /// Mirror the device's paused flag
    fn sync_playing_state(&mut self) {
        let playing = self.device.is_bound() && !self.device.is_paused();
        self.set_playing(playing);
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(PlayerEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlayerEvent::PositionUpdate {
            position_ms: self.device.position().as_millis() as u64,
            duration_ms: self.device.duration().map(|d| d.as_millis() as u64),
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlayerEvent::Error { message });
    }
}
