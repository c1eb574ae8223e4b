//! Test doubles for the playback controller
//!
//! Both doubles are cheap clones over shared state, so a test can hand one
//! clone to the controller and keep another to inspect or poke.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tapedeck_core::{
    AudioFile, MediaHandle, PlaylistStore, Result, TapedeckError, Track, TrackId,
    TransportDevice, TransportEvent, TransportListener,
};
use tapedeck_playback::{PlaybackConfig, PlaybackController};

// ===== Store =====

#[derive(Clone, Default)]
pub struct MockStore {
    tracks: Arc<Mutex<Vec<Track>>>,
    next_id: Arc<Mutex<i64>>,
    pub fail_reads: Arc<AtomicBool>,
    pub fail_writes: Arc<AtomicBool>,
    pub fail_clear: Arc<AtomicBool>,
    /// Number of successful writes allowed before writes start failing
    pub writes_before_failure: Arc<Mutex<Option<usize>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    fn unavailable() -> TapedeckError {
        TapedeckError::storage("mock store offline")
    }
}

#[async_trait]
impl PlaylistStore for MockStore {
    async fn add_track(&self, file: AudioFile) -> Result<Option<TrackId>> {
        if !file.is_audio() {
            return Ok(None);
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        {
            let mut budget = self.writes_before_failure.lock().unwrap();
            if let Some(remaining) = budget.as_mut() {
                if *remaining == 0 {
                    return Err(Self::unavailable());
                }
                *remaining -= 1;
            }
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = TrackId::new(*next_id);

        self.tracks.lock().unwrap().push(Track {
            id,
            name: file.name,
            payload: file.payload,
            added_at: 1_700_000_000_000 + *next_id,
        });

        Ok(Some(id))
    }

    async fn list_tracks(&self) -> Result<Vec<Track>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.tracks.lock().unwrap().clone())
    }

    async fn clear_all(&self) -> Result<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.tracks.lock().unwrap().clear();
        Ok(())
    }
}

// ===== Transport =====

#[derive(Default)]
struct TransportState {
    bound: Option<MediaHandle>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    /// Duration reported for every newly bound resource
    metadata_duration: Option<Duration>,
    listeners: Vec<TransportListener>,
    fail_play: bool,
    play_calls: usize,
    bind_calls: usize,
    unbind_calls: usize,
    last_handle: Option<MediaHandle>,
}

impl TransportState {
    fn emit(&mut self, event: TransportEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<TransportState>>,
}

impl MockTransport {
    /// A device that learns a duration as soon as something is bound
    pub fn with_duration(duration: Duration) -> Self {
        let device = Self::without_metadata();
        device.state.lock().unwrap().metadata_duration = Some(duration);
        device
    }

    /// A device whose metadata never loads
    pub fn without_metadata() -> Self {
        Self {
            state: Arc::new(Mutex::new(TransportState {
                paused: true,
                ..TransportState::default()
            })),
        }
    }

    pub fn set_fail_play(&self, fail: bool) {
        self.state.lock().unwrap().fail_play = fail;
    }

    /// Play through to the end, as the platform would
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        if let Some(duration) = state.duration {
            state.position = duration;
        }
        state.paused = true;
        state.emit(TransportEvent::Paused);
        state.emit(TransportEvent::Ended);
    }

    /// Advance the clock and report the new position
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        state.position += by;
        let position = state.position;
        state.emit(TransportEvent::TimeUpdate { position });
    }

    pub fn bound_name(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .bound
            .as_ref()
            .map(|h| h.name().to_string())
    }

    pub fn last_handle(&self) -> Option<MediaHandle> {
        self.state.lock().unwrap().last_handle.clone()
    }

    pub fn play_calls(&self) -> usize {
        self.state.lock().unwrap().play_calls
    }

    pub fn bind_calls(&self) -> usize {
        self.state.lock().unwrap().bind_calls
    }

    pub fn unbind_calls(&self) -> usize {
        self.state.lock().unwrap().unbind_calls
    }
}

impl TransportDevice for MockTransport {
    fn bind(&mut self, handle: MediaHandle) {
        let mut state = self.state.lock().unwrap();
        state.bind_calls += 1;
        let was_playing = state.bound.is_some() && !state.paused;
        state.bound = Some(handle.clone());
        state.last_handle = Some(handle);
        state.paused = true;
        state.position = Duration::ZERO;
        state.duration = state.metadata_duration;
        if was_playing {
            state.emit(TransportEvent::Paused);
        }
        if let Some(duration) = state.duration {
            state.emit(TransportEvent::MetadataLoaded { duration });
        }
    }

    fn unbind(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.unbind_calls += 1;
        let was_playing = state.bound.is_some() && !state.paused;
        state.bound = None;
        state.paused = true;
        state.position = Duration::ZERO;
        state.duration = None;
        if was_playing {
            state.emit(TransportEvent::Paused);
        }
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.play_calls += 1;
        if state.fail_play {
            return Err(TapedeckError::transport("playback blocked"));
        }
        if state.bound.is_none() {
            return Err(TapedeckError::transport("no source bound"));
        }
        if state.paused {
            state.paused = false;
            state.emit(TransportEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        if !state.paused {
            state.paused = true;
            state.emit(TransportEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    fn is_bound(&self) -> bool {
        self.state.lock().unwrap().bound.is_some()
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn set_position(&mut self, position: Duration) {
        self.state.lock().unwrap().position = position;
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn subscribe(&mut self, listener: TransportListener) {
        self.state.lock().unwrap().listeners.push(listener);
    }
}

// ===== Helpers =====

pub type TestController = PlaybackController<MockStore, MockTransport>;

pub fn mp3(name: &str) -> AudioFile {
    AudioFile::new(name, "audio/mpeg", Bytes::copy_from_slice(name.as_bytes()))
}

pub fn mp3s(count: usize) -> Vec<AudioFile> {
    (1..=count).map(|n| mp3(&format!("track-{}.mp3", n))).collect()
}

/// A loaded controller over `count` tracks, each 3 minutes long
pub async fn controller_with_tracks(count: usize) -> (TestController, MockStore, MockTransport) {
    let store = MockStore::new();
    let device = MockTransport::with_duration(Duration::from_secs(180));

    let mut controller =
        PlaybackController::new(store.clone(), device.clone(), PlaybackConfig::default());
    controller.load().await.expect("load should succeed");
    if count > 0 {
        controller
            .add_files(mp3s(count))
            .await
            .expect("add should succeed");
    }
    controller.process_transport_events();
    controller.drain_events();

    (controller, store, device)
}
