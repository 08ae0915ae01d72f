//! Display utilities for the focus timer.
//!
//! This module provides formatted output for:
//! - Remaining time (`MM:SS`, or `HH:MM:SS` once hours are non-zero)
//! - The terminal window title
//! - Command-line messages

use std::fmt;

use crate::config::AppConfig;

/// Suffix appended to the remaining time in the window title.
pub const TITLE_SUFFIX: &str = "Focus";

// ============================================================================
// TimeParts
// ============================================================================

/// Remaining time split into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Hours, present only when non-zero
    pub hours: Option<u32>,
    pub minutes: u32,
    pub seconds: u32,
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours {
            Some(h) => write!(f, "{:02}:{:02}:{:02}", h, self.minutes, self.seconds),
            None => write!(f, "{:02}:{:02}", self.minutes, self.seconds),
        }
    }
}

/// Splits a number of seconds into display fields.
pub fn format_time(total_seconds: u32) -> TimeParts {
    let hours = total_seconds / 3600;
    TimeParts {
        hours: (hours > 0).then_some(hours),
        minutes: (total_seconds % 3600) / 60,
        seconds: total_seconds % 60,
    }
}

/// Builds the window title for the given remaining time.
pub fn window_title(total_seconds: u32) -> String {
    format!("{} - {}", format_time(total_seconds), TITLE_SUFFIX)
}

// ============================================================================
// Display
// ============================================================================

/// Command-line output helpers.
pub struct Display;

impl Display {
    /// Prints the effective configuration as pretty JSON.
    pub fn show_config(config: &AppConfig) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(config)?);
        Ok(())
    }

    /// Shows a one-line summary printed after the interactive screen closes.
    pub fn show_session_end(remaining_seconds: u32, running: bool) {
        let state = if running { "running" } else { "stopped" };
        println!("Timer {} at {}", state, format_time(remaining_seconds));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
