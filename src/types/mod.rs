//! Core data types for the focus timer.
//!
//! This module defines the data structures shared across modules:
//! - Background theme selection
//! - Serializable countdown snapshots

use serde::{Deserialize, Serialize};

// ============================================================================
// Theme
// ============================================================================

/// Background theme shown behind the countdown.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Pixel snow on a dark background
    #[default]
    Snow,
    /// Falling autumn leaves on a grey background
    Leaves,
}

impl Theme {
    /// Returns the string representation of the theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Snow => "snow",
            Theme::Leaves => "leaves",
        }
    }

    /// Returns the other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Snow => Theme::Leaves,
            Theme::Leaves => Theme::Snow,
        }
    }

    /// Returns the background colour as an RGB triple.
    pub fn background_rgb(&self) -> (u8, u8, u8) {
        match self {
            Theme::Snow => (0x20, 0x20, 0x20),
            Theme::Leaves => (0x2d, 0x34, 0x36),
        }
    }
}

// ============================================================================
// CountdownSnapshot
// ============================================================================

/// A point-in-time copy of the countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    /// Remaining seconds
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Duration restored by reset
    #[serde(rename = "configuredSeconds")]
    pub configured_seconds: u32,
    /// Whether a countdown is active
    pub running: bool,
}

// ============================================================================
// Tests
// ============================================================================
