//! CLI module for the focus timer.
//!
//! - `commands`: Command definitions using clap derive

pub mod commands;

pub use commands::{Cli, Commands, RunArgs};
