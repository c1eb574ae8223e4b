//! Elapsed/duration text and progress math

use std::time::Duration;

/// Text shown for an unknown time
pub const UNKNOWN_TIME: &str = "0:00";

/// Format seconds as `minutes:seconds` with zero-padded seconds
///
/// NaN, infinite and negative values render as `0:00`.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNKNOWN_TIME.to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format an optional time; `None` (not yet known) renders as `0:00`
pub fn format_time(time: Option<Duration>) -> String {
    time.map_or_else(
        || UNKNOWN_TIME.to_string(),
        |t| format_seconds(t.as_secs_f64()),
    )
}

/// Progress bar fill in percent, `None` while the duration is unknown or zero
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> Option<f64> {
    let duration = duration.filter(|d| !d.is_zero())?;
    Some((position.as_secs_f64() / duration.as_secs_f64() * 100.0).clamp(0.0, 100.0))
}
