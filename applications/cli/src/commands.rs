//! Subcommands and the interactive player loop

use crate::config::AppConfig;
use crate::console::{Console, ConsoleCommand, HELP};
use crate::error::{CliError, Result};
use crate::render::{describe_event, render_playlist, render_status};
use crate::transport::ClockTransport;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tapedeck_core::{AudioFile, Confirmation};
use tapedeck_playback::{ClearOutcome, PlaybackController};
use tapedeck_storage::SqlitePlaylistStore;
use tokio::io::AsyncBufRead;
use tokio::time::{Instant, MissedTickBehavior};

pub type CliController = PlaybackController<SqlitePlaylistStore, ClockTransport>;

/// Build a controller over the configured database
///
/// Nothing is read until the first operation.
pub fn build_controller(config: &AppConfig) -> CliController {
    let store = SqlitePlaylistStore::new(config.storage.database_url.clone());
    PlaybackController::new(store, ClockTransport::new(), config.playback.clone())
}

/// Media type guessed from the file extension
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Read one file from disk into an upload
pub async fn read_audio_file(path: &Path) -> Result<AudioFile> {
    let payload = tokio::fs::read(path).await.map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(AudioFile::new(name, media_type_for(path), payload))
}

/// Read a selection of files, stopping at the first unreadable one
pub async fn read_audio_files(paths: &[PathBuf]) -> Result<Vec<AudioFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_audio_file(path).await?);
    }
    Ok(files)
}

/// `tapedeck list`
pub async fn list(controller: &mut CliController) -> Result<()> {
    controller.load().await?;
    println!("{}", render_playlist(&controller.view()));
    Ok(())
}

/// `tapedeck add <paths>`
pub async fn add(controller: &mut CliController, paths: &[PathBuf]) -> Result<usize> {
    controller.load().await?;

    let files = read_audio_files(paths).await?;
    let offered = files.len();
    let accepted = controller.add_files(files).await?;

    println!("Added {} of {} files", accepted, offered);
    if accepted < offered {
        println!("Skipped {} files that are not audio", offered - accepted);
    }
    Ok(accepted)
}

/// `tapedeck clear`
pub async fn clear<C>(controller: &mut CliController, confirmation: &C) -> Result<ClearOutcome>
where
    C: Confirmation + ?Sized,
{
    controller.load().await?;

    let outcome = controller.clear_all(confirmation).await?;
    match outcome {
        ClearOutcome::Cleared => println!("Playlist cleared"),
        ClearOutcome::Declined => println!("Nothing removed"),
    }
    Ok(outcome)
}

/// `tapedeck play`: the interactive player
///
/// Runs until `quit`, end of input or Ctrl-C. The transport clock advances
/// once per `tick`.
pub async fn run_interactive<R>(
    controller: &mut CliController,
    console: &Console<R>,
    tick: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send,
{
    match controller.load().await {
        Ok(()) => println!("{}", render_playlist(&controller.view())),
        // The player still starts; every control stays disabled
        Err(e) => eprintln!("Playlist unavailable: {}", e),
    }
    controller.drain_events();
    println!("Type 'help' for commands");

    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            line = console.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("End of input");
                    break;
                };
                match ConsoleCommand::parse(&line) {
                    Ok(Some(ConsoleCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(e) = execute(controller, console, command).await {
                            eprintln!("{}", e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{} (type 'help')", e),
                }
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                controller.device_mut().advance(now - last_tick);
                last_tick = now;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }

        controller.process_transport_events();
        report_events(controller);
    }

    controller.pause();
    controller.process_transport_events();
    controller.drain_events();

    Ok(())
}

/// Apply one console command
///
/// `quit` is left to the caller.
pub async fn execute<R>(
    controller: &mut CliController,
    console: &Console<R>,
    command: ConsoleCommand,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send,
{
    match command {
        ConsoleCommand::Play => controller.play(),
        ConsoleCommand::Pause => controller.pause(),
        ConsoleCommand::Toggle => controller.toggle_play_pause(),
        ConsoleCommand::Next => controller.next(),
        ConsoleCommand::Previous => controller.previous(),
        ConsoleCommand::SkipForward => controller.skip_forward(),
        ConsoleCommand::Seek(percent) => controller.seek_to_fraction(percent / 100.0),
        ConsoleCommand::Select(position) => match row_index(controller, position) {
            Some(index) => controller.play_track(index),
            None => println!("There is no track {}", position),
        },
        ConsoleCommand::Cue(position) => match row_index(controller, position) {
            Some(index) => controller.load_track(index),
            None => println!("There is no track {}", position),
        },
        ConsoleCommand::Add(paths) => {
            let files = read_audio_files(&paths).await?;
            let offered = files.len();
            let accepted = controller.add_files(files).await?;
            println!("Added {} of {} files", accepted, offered);
        }
        ConsoleCommand::List => println!("{}", render_playlist(&controller.view())),
        ConsoleCommand::Status => println!("{}", render_status(&controller.view())),
        ConsoleCommand::Clear => {
            if controller.clear_all(console).await? == ClearOutcome::Declined {
                println!("Nothing removed");
            }
        }
        ConsoleCommand::Reload => {
            controller.load().await?;
            println!("{}", render_playlist(&controller.view()));
        }
        ConsoleCommand::Help => println!("{}", HELP),
        // Handled by the loop
        ConsoleCommand::Quit => {}
    }

    Ok(())
}

/// Playlist index for a 1-based row number
fn row_index(controller: &CliController, position: usize) -> Option<usize> {
    position.checked_sub(1).filter(|i| *i < controller.len())
}

/// Print the user-facing player events queued since the last call
fn report_events(controller: &mut CliController) {
    for event in controller.drain_events() {
        tracing::trace!(?event, "Player event");
        if let Some(message) = describe_event(&event) {
            println!("{}", message);
        }
    }
}
