//! Silent, clock-driven transport device
//!
//! Nothing is decoded or played out loud. The device keeps a position that
//! advances with [`ClockTransport::advance`] while playing, learns the track
//! length from container metadata and reports the end of the track like a
//! real output would.

use lofty::{AudioFile as _, Probe};
use std::io::Cursor;
use std::time::Duration;
use tapedeck_core::{
    MediaHandle, Result, TapedeckError, TransportDevice, TransportEvent, TransportListener,
};

/// Read the playing time from an in-memory audio container
///
/// Returns `None` when the format is not recognised or reports no length.
pub fn read_duration(payload: &[u8]) -> Option<Duration> {
    let guessed = match Probe::new(Cursor::new(payload)).guess_file_type() {
        Ok(guessed) => guessed,
        Err(e) => {
            tracing::debug!(error = %e, "Could not guess container type");
            return None;
        }
    };

    let tagged_file = match guessed.read() {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(error = %e, "Could not read container metadata");
            return None;
        }
    };

    let duration = tagged_file.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// A transport with no audio output
pub struct ClockTransport {
    bound: Option<MediaHandle>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    listeners: Vec<TransportListener>,
}

impl ClockTransport {
    pub fn new() -> Self {
        Self {
            bound: None,
            paused: true,
            position: Duration::ZERO,
            duration: None,
            listeners: Vec::new(),
        }
    }

    /// Name of the bound resource
    pub fn bound_name(&self) -> Option<&str> {
        self.bound.as_ref().map(MediaHandle::name)
    }

    /// Let `elapsed` pass on the device clock
    ///
    /// Only moves while playing. Reaching the known duration pauses the device
    /// and reports the end of the track.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.bound.is_none() || self.paused {
            return;
        }

        self.position = self.position.saturating_add(elapsed);

        match self.duration {
            Some(duration) if self.position >= duration => {
                self.position = duration;
                self.paused = true;
                self.emit(TransportEvent::TimeUpdate { position: duration });
                self.emit(TransportEvent::Paused);
                self.emit(TransportEvent::Ended);
            }
            _ => {
                let position = self.position;
                self.emit(TransportEvent::TimeUpdate { position });
            }
        }
    }

    fn emit(&mut self, event: TransportEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl Default for ClockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportDevice for ClockTransport {
    fn bind(&mut self, handle: MediaHandle) {
        let was_playing = self.bound.is_some() && !self.paused;

        self.duration = read_duration(handle.payload());
        self.position = Duration::ZERO;
        self.paused = true;

        tracing::debug!(
            name = handle.name(),
            handle = %handle.id(),
            duration_ms = self.duration.map(|d| d.as_millis() as u64),
            "Bound track"
        );
        self.bound = Some(handle);

        if was_playing {
            self.emit(TransportEvent::Paused);
        }
        if let Some(duration) = self.duration {
            self.emit(TransportEvent::MetadataLoaded { duration });
        }
    }

    fn unbind(&mut self) {
        let was_playing = self.bound.is_some() && !self.paused;

        self.bound = None;
        self.paused = true;
        self.position = Duration::ZERO;
        self.duration = None;

        if was_playing {
            self.emit(TransportEvent::Paused);
        }
    }

    fn play(&mut self) -> Result<()> {
        let Some(handle) = &self.bound else {
            return Err(TapedeckError::transport("no track bound"));
        };
        if handle.is_revoked() {
            return Err(TapedeckError::transport(format!(
                "handle {} was revoked",
                handle.id()
            )));
        }

        // A finished track starts over
        if self.duration.is_some_and(|d| self.position >= d) {
            self.position = Duration::ZERO;
        }

        if self.paused {
            self.paused = false;
            self.emit(TransportEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.emit(TransportEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn set_position(&mut self, position: Duration) {
        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn subscribe(&mut self, listener: TransportListener) {
        self.listeners.push(listener);
    }
}
