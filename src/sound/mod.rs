//! Sound playback for the focus timer.
//!
//! This module provides the audio cues around the countdown:
//!
//! - An alarm on expiry (configured file, or a synthesized beep pattern)
//! - Looping background music while the timer runs
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Trait used by the app controller
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ RodioSoundPlayer │────▶│ alarm Sink       │
//! │                  │     ├──────────────────┤
//! │                  │────▶│ music Sink       │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! Audio is best effort. A player that cannot be created is simply absent,
//! and playback errors are logged by the caller and otherwise ignored.

mod error;
mod player;
mod source;

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::config::SoundConfig;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::SoundSource;

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays the alarm from the start.
    fn play_alarm(&self) -> Result<(), SoundError>;

    /// Silences the alarm.
    fn stop_alarm(&self);

    /// Starts the background music from the beginning.
    fn start_music(&self) -> Result<(), SoundError>;

    /// Resumes paused music.
    fn resume_music(&self) -> Result<(), SoundError>;

    /// Pauses the music, keeping its position.
    fn pause_music(&self);

    /// Stops the music.
    fn stop_music(&self);
}

/// Builds the player described by the sound config.
///
/// Returns None when sound is switched off (`sound.enabled = false` or
/// `--no-sound`) or when no audio device is available.
#[must_use]
pub fn player_from_config(config: &SoundConfig) -> Option<Rc<dyn SoundPlayer>> {
    if !config.enabled {
        tracing::debug!("Sound disabled by configuration");
        return None;
    }

    try_create_player(
        SoundSource::alarm(config.alarm_file.as_deref()),
        config.music_file.clone().map(SoundSource::file),
    )
    .map(|player| player as Rc<dyn SoundPlayer>)
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_alarm(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::play_alarm(self)
    }

    fn stop_alarm(&self) {
        RodioSoundPlayer::stop_alarm(self)
    }

    fn start_music(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::start_music(self)
    }

    fn resume_music(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::resume_music(self)
    }

    fn pause_music(&self) {
        RodioSoundPlayer::pause_music(self)
    }

    fn stop_music(&self) {
        RodioSoundPlayer::stop_music(self)
    }
}

/// A call recorded by [`MockSoundPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCall {
    PlayAlarm,
    StopAlarm,
    StartMusic,
    ResumeMusic,
    PauseMusic,
    StopMusic,
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    calls: Mutex<Vec<SoundCall>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<SoundCall> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn count(&self, call: SoundCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: SoundCall) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_alarm(&self) -> Result<(), SoundError> {
        self.record(SoundCall::PlayAlarm)
    }

    fn stop_alarm(&self) {
        let _ = self.record(SoundCall::StopAlarm);
    }

    fn start_music(&self) -> Result<(), SoundError> {
        self.record(SoundCall::StartMusic)
    }

    fn resume_music(&self) -> Result<(), SoundError> {
        self.record(SoundCall::ResumeMusic)
    }

    fn pause_music(&self) {
        let _ = self.record(SoundCall::PauseMusic);
    }

    fn stop_music(&self) {
        let _ = self.record(SoundCall::StopMusic);
    }
}
