//! Playtime accounting
//!
//! Wall-clock source and the helpers used to total and display playtime.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Clock backed by the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Whole seconds elapsed between `start` and `now`, rounded up
///
/// A clock that went backwards counts as no time played.
pub fn elapsed_whole_seconds(start: f64, now: f64) -> u64 {
    let elapsed = (now - start).ceil();
    if elapsed > 0.0 {
        elapsed as u64
    } else {
        0
    }
}

/// Format a playtime as `H:MM:SS`
///
/// Hours are not capped; minutes and seconds are zero-padded.
pub fn format_playtime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
