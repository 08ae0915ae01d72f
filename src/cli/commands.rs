//! Command definitions for the focus timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, MAX_MINUTES};
use crate::entry::parse_clock_time;
use crate::types::Theme;

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus timer - a Pomodoro countdown for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "focus-timer",
    version,
    about = "Pomodoro countdown timer for the terminal",
    long_about = "A Pomodoro countdown timer for the terminal.\n\
                  Presets, a custom time dialog, an expiry alarm with desktop \
                  notification, background music and animated themes.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file (must exist when given)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive timer
    Run(RunArgs),

    /// Print the effective configuration as JSON
    Config,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Initial duration in minutes
    #[arg(
        short,
        long,
        conflicts_with = "time",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_MINUTES))
    )]
    pub minutes: Option<u32>,

    /// Initial duration as HH:MM:SS, MM:SS or SS
    #[arg(long, value_parser = parse_time)]
    pub time: Option<u32>,

    /// Background theme
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Disable the alarm and background music
    #[arg(long)]
    pub no_sound: bool,

    /// Start with background music off
    #[arg(long)]
    pub no_music: bool,

    /// Disable the desktop notification on expiry
    #[arg(long)]
    pub no_notify: bool,

    /// Start counting down immediately
    #[arg(short, long)]
    pub autostart: bool,
}

impl RunArgs {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if self.no_sound {
            config.sound.enabled = false;
        }
        if self.no_music {
            config.sound.music = false;
        }
        if self.no_notify {
            config.notifications = false;
        }
    }

    /// Initial duration in seconds, falling back to the configured default.
    pub fn initial_seconds(&self, config: &AppConfig) -> u32 {
        match (self.time, self.minutes) {
            (Some(seconds), _) => seconds,
            (None, Some(minutes)) => minutes * 60,
            (None, None) => config.default_seconds(),
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses the `--time` value.
fn parse_time(s: &str) -> Result<u32, String> {
    parse_clock_time(s).map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
