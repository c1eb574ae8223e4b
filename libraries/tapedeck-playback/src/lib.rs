//! Tapedeck - Playback Control
//!
//! Platform-agnostic playlist playback for Tapedeck.
//!
//! This crate provides:
//! - The playlist state machine (selection, playing flag)
//! - Wraparound navigation (next/previous, auto-advance on track end)
//! - Seeking (relative skip with clamping, fraction of duration)
//! - Confirmed clearing
//! - Player events and a render-ready view
//!
//! # Architecture
//!
//! `tapedeck-playback` is completely platform-agnostic:
//! - No dependency on tapedeck-storage (database)
//! - No dependency on any audio backend or UI toolkit
//!
//! The store and the transport device are injected through the
//! `PlaylistStore` and `TransportDevice` traits from `tapedeck-core`.
//!
//! # Example
//!
//! ```rust,no_run
//! use tapedeck_core::{AudioFile, PlaylistStore, TransportDevice};
//! use tapedeck_playback::{PlaybackConfig, PlaybackController};
//!
//! # async fn example<S: PlaylistStore, D: TransportDevice>(
//! #     store: S,
//! #     device: D,
//! # ) -> tapedeck_core::Result<()> {
//! let mut controller = PlaybackController::new(store, device, PlaybackConfig::default());
//!
//! // Rebuild the playlist from what was persisted last time
//! controller.load().await?;
//!
//! controller
//!     .add_files(vec![AudioFile::new("song.mp3", "audio/mpeg", vec![0u8; 64])])
//!     .await?;
//!
//! controller.play();
//! controller.skip_forward();
//! controller.next();
//!
//! // Feed device notifications (ended, time updates) back in
//! controller.process_transport_events();
//!
//! for event in controller.drain_events() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod handles;
pub mod events;
pub mod time;
pub mod types;
pub mod view;

// Public exports
pub use controller::{PlaybackController, CLEAR_PROMPT};
pub use events::PlayerEvent;
pub use handles::HandleRegistry;
pub use time::{format_seconds, format_time, progress_percent};
pub use types::{ClearOutcome, PlaybackConfig};
pub use view::{ControlState, PlayerView, PlaylistRow};
