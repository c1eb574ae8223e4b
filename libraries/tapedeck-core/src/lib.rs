//! Tapedeck Core
//!
//! Platform-agnostic core types, traits, and error handling for Tapedeck.
//!
//! This crate provides the foundational building blocks shared by the storage
//! layer, the playback controller and every front end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `AudioFile`, `MediaHandle`
//! - **Core Traits**: `PlaylistStore`, `TransportDevice`, `Confirmation`
//! - **Error Handling**: Unified `TapedeckError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tapedeck_core::types::AudioFile;
//!
//! let song = AudioFile::new("song.mp3", "audio/mpeg", vec![0u8; 16]);
//! assert!(song.is_audio());
//!
//! let notes = AudioFile::new("notes.txt", "text/plain", b"hello".to_vec());
//! assert!(!notes.is_audio());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TapedeckError};
pub use traits::{Confirmation, PlaylistStore, TransportDevice, TransportListener};

pub use types::{AudioFile, HandleId, MediaHandle, Track, TrackId, TransportEvent};
