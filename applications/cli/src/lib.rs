//! Tapedeck CLI
//!
//! Terminal front end for the playlist player: configuration, a silent
//! clock-driven transport, console input and the interactive loop.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod offline;
pub mod render;
pub mod transport;

pub use config::AppConfig;
pub use error::{CliError, Result};
