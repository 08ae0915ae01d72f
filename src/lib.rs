//! Focus Timer Library
//!
//! This library provides the core functionality for the focus timer CLI.
//! It includes:
//! - Countdown engine with drift-free remaining time and single expiry
//! - Time formatting and the custom time entry dialog
//! - Sound playback (alarm and background music)
//! - Desktop notification on expiry
//! - Animated background themes
//! - The interactive terminal application and CLI parsing

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod effects;
pub mod engine;
pub mod entry;
pub mod notification;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ConfigError, SoundConfig};
pub use engine::{
    Clock, CountdownEngine, EngineError, InvalidDurationReason, ManualClock, SystemClock,
    TimerEvent,
};
pub use types::{CountdownSnapshot, Theme};

// Re-export notification types
pub use notification::{
    DesktopNotifier, MockNotificationSender, NotificationError, NotificationSender,
};

// Re-export sound types
pub use sound::{
    player_from_config, try_create_player, MockSoundPlayer, RodioSoundPlayer, SoundError,
    SoundPlayer, SoundSource,
};

// Re-export effect types
pub use effects::{Backdrop, BackgroundEffect, LeavesEffect, SnowEffect};
