//! Sound player implementation using rodio.
//!
//! The alarm and the background music each get their own `Sink`, kept
//! alive by the player so they can be paused or silenced later.

use std::fs::File;
use std::io::BufReader;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

/// Beep frequency in Hz.
const BEEP_HZ: f32 = 880.0;
/// Length of one beep.
const BEEP_LENGTH: Duration = Duration::from_millis(200);
/// Silence between the two beeps of a pair.
const BEEP_GAP: Duration = Duration::from_millis(100);
/// Silence between pairs.
const PAIR_GAP: Duration = Duration::from_millis(700);
/// Number of beep pairs in one alarm.
const ALARM_REPEATS: usize = 20;
/// Beep volume.
const BEEP_VOLUME: f32 = 0.25;

/// A sound player that uses rodio for audio playback.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    alarm_source: SoundSource,
    music_source: Option<SoundSource>,
    alarm: Mutex<Option<Sink>>,
    music: Mutex<Option<Sink>>,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(
        alarm_source: SoundSource,
        music_source: Option<SoundSource>,
    ) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!(
            "Audio output stream initialized, alarm: {}",
            alarm_source.name()
        );

        Ok(Self {
            _stream: stream,
            stream_handle,
            alarm_source,
            music_source,
            alarm: Mutex::new(None),
            music: Mutex::new(None),
        })
    }

    /// Plays the alarm from the start, replacing any alarm still playing.
    ///
    /// A file that cannot be opened or decoded falls back to the beep.
    pub fn play_alarm(&self) -> Result<(), SoundError> {
        self.stop_alarm();
        let sink = self.new_sink()?;

        match &self.alarm_source {
            SoundSource::File { name, path } => match open_decoder(path) {
                Ok(decoder) => {
                    debug!("Playing alarm file: {}", name);
                    sink.append(decoder);
                }
                Err(e) if e.should_fallback_to_beep() => {
                    warn!("Failed to load alarm '{}': {}, using beep", name, e);
                    append_beeps(&sink);
                }
                Err(e) => return Err(e),
            },
            SoundSource::Beep => append_beeps(&sink),
        }

        *lock(&self.alarm) = Some(sink);
        Ok(())
    }

    /// Silences the alarm.
    pub fn stop_alarm(&self) {
        if let Some(sink) = lock(&self.alarm).take() {
            sink.stop();
            debug!("Alarm stopped");
        }
    }

    /// Starts the background music from the beginning.
    pub fn start_music(&self) -> Result<(), SoundError> {
        self.stop_music();

        let Some(path) = self.music_source.as_ref().and_then(SoundSource::path) else {
            debug!("No background music configured");
            return Ok(());
        };

        let decoder = open_decoder(path)?;
        let sink = self.new_sink()?;
        sink.append(decoder.repeat_infinite());
        debug!("Background music started");

        *lock(&self.music) = Some(sink);
        Ok(())
    }

    /// Continues paused music, or starts it if nothing is loaded.
    pub fn resume_music(&self) -> Result<(), SoundError> {
        if let Some(sink) = lock(&self.music).as_ref() {
            sink.play();
            return Ok(());
        }
        self.start_music()
    }

    /// Pauses the music, keeping its position.
    pub fn pause_music(&self) {
        if let Some(sink) = lock(&self.music).as_ref() {
            sink.pause();
        }
    }

    /// Stops the music and forgets its position.
    pub fn stop_music(&self) {
        if let Some(sink) = lock(&self.music).take() {
            sink.stop();
        }
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("alarm_source", &self.alarm_source)
            .field("music_source", &self.music_source)
            .finish_non_exhaustive()
    }
}

fn lock(sink: &Mutex<Option<Sink>>) -> std::sync::MutexGuard<'_, Option<Sink>> {
    sink.lock().unwrap_or_else(|e| e.into_inner())
}

fn open_decoder(path: &std::path::Path) -> Result<Decoder<BufReader<File>>, SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))
}

fn beep() -> impl Source<Item = f32> + Send + 'static {
    SineWave::new(BEEP_HZ)
        .take_duration(BEEP_LENGTH)
        .amplify(BEEP_VOLUME)
}

/// Queues the 200ms-on / 100ms-off / 200ms-on pattern, repeated.
fn append_beeps(sink: &Sink) {
    for i in 0..ALARM_REPEATS {
        let lead = if i == 0 { Duration::ZERO } else { PAIR_GAP };
        sink.append(beep().delay(lead));
        sink.append(beep().delay(BEEP_GAP));
    }
}

/// Creates a sound player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_player(
    alarm_source: SoundSource,
    music_source: Option<SoundSource>,
) -> Option<Rc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(alarm_source, music_source) {
        Ok(player) => Some(Rc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests skip themselves when no audio device exists (e.g. CI).

    fn beep_player() -> Option<RodioSoundPlayer> {
        RodioSoundPlayer::new(SoundSource::Beep, None).ok()
    }

    #[test]
    fn test_beep_alarm_plays_and_stops() {
        let Some(player) = beep_player() else {
            return;
        };

        assert!(player.play_alarm().is_ok());
        assert!(lock(&player.alarm).is_some());

        player.stop_alarm();
        assert!(lock(&player.alarm).is_none());
    }

    #[test]
    fn test_music_without_source_is_noop() {
        let Some(player) = beep_player() else {
            return;
        };

        assert!(player.start_music().is_ok());
        assert!(lock(&player.music).is_none());
        player.pause_music();
        player.stop_music();
    }

    #[test]
    fn test_missing_alarm_file_falls_back_to_beep() {
        let source = SoundSource::file("/nonexistent/path/to/alarm.wav");
        let Ok(player) = RodioSoundPlayer::new(source, None) else {
            return;
        };

        assert!(player.play_alarm().is_ok());
        player.stop_alarm();
        assert!(lock(&player.alarm).is_none());
    }

    #[test]
    fn test_missing_music_file_errors() {
        let music = SoundSource::file("/nonexistent/music.mp3");
        let Ok(player) = RodioSoundPlayer::new(SoundSource::Beep, Some(music)) else {
            return;
        };

        let err = player.start_music().unwrap_err();
        assert!(err.is_file_error());
    }

    #[test]
    fn test_try_create_player_no_panic() {
        let _ = try_create_player(SoundSource::Beep, None);
    }

    #[test]
    fn test_debug_impl() {
        let Some(player) = beep_player() else {
            return;
        };
        assert!(format!("{:?}", player).contains("RodioSoundPlayer"));
    }
}
