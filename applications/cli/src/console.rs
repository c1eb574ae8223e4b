//! Line-based console input
//!
//! Parses interactive commands and answers the clear confirmation prompt.

use crate::error::{CliError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use tapedeck_core::Confirmation;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// One interactive command
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    SkipForward,
    /// Seek to a percentage of the track
    Seek(f64),
    /// Play a track by its 1-based position in the list
    Select(usize),
    /// Load a track by its 1-based position without playing
    Cue(usize),
    Add(Vec<PathBuf>),
    List,
    Status,
    Clear,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  p, play            start or resume
  pause              pause
  space, t, toggle   play/pause
  n, next            next track (wraps)
  b, prev            previous track (wraps)
  f, skip            skip forward
  seek <percent>     jump within the track
  <number>           play that track
  cue <number>       load that track without playing
  add <paths...>     add audio files
  l, list            show the playlist
  s, status          show the current track
  r, reload          re-read the playlist from disk
  clear              remove every track (asks first)
  h, help            this text
  q, quit            exit";

impl ConsoleCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        // A lone space toggles, like a media key
        if line == " " {
            return Ok(Some(Self::Toggle));
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        if let Ok(position) = verb.parse::<usize>() {
            return Ok(Some(Self::Select(track_number(position)?)));
        }

        let command = match verb.to_ascii_lowercase().as_str() {
            "p" | "play" => Self::Play,
            "pause" => Self::Pause,
            "space" | "t" | "toggle" => Self::Toggle,
            "n" | "next" => Self::Next,
            "b" | "prev" | "previous" => Self::Previous,
            "f" | "skip" => Self::SkipForward,
            "seek" => {
                let percent = words
                    .next()
                    .and_then(|w| w.trim_end_matches('%').parse::<f64>().ok())
                    .filter(|p| p.is_finite())
                    .ok_or_else(|| {
                        CliError::InvalidCommand("seek needs a percentage".to_string())
                    })?;
                Self::Seek(percent)
            }
            "cue" => {
                let position = words
                    .next()
                    .and_then(|w| w.parse::<usize>().ok())
                    .ok_or_else(|| {
                        CliError::InvalidCommand("cue needs a track number".to_string())
                    })?;
                Self::Cue(track_number(position)?)
            }
            "add" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(CliError::InvalidCommand(
                        "add needs at least one path".to_string(),
                    ));
                }
                return Ok(Some(Self::Add(paths)));
            }
            "l" | "ls" | "list" => Self::List,
            "s" | "status" => Self::Status,
            "r" | "reload" => Self::Reload,
            "clear" => Self::Clear,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => return Err(CliError::InvalidCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn track_number(position: usize) -> Result<usize> {
    if position == 0 {
        return Err(CliError::InvalidCommand(
            "tracks are numbered from 1".to_string(),
        ));
    }
    Ok(position)
}

/// Reads lines from any buffered async source
pub struct Console<R> {
    lines: Mutex<Lines<R>>,
}

impl Console<BufReader<Stdin>> {
    /// Console over the process's standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> Console<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    /// Next raw line, `None` at end of input
    ///
    /// Safe to race in `tokio::select!`: a cancelled read loses no input.
    pub async fn next_line(&self) -> Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }
}

/// Whether an answer to a yes/no prompt means yes
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl<R> Confirmation for Console<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = std::io::stdout().flush();

        match self.next_line().await {
            Ok(Some(answer)) => is_affirmative(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}
