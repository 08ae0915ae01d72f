//! Application controller.
//!
//! Owns the countdown engine and reacts to user actions and engine events.
//! Sound, notifications and the backdrop hang off the controller; the
//! engine never sees them.

use std::rc::Rc;

use tracing::{debug, warn};

use super::input::{Action, Mode};
use crate::effects::Backdrop;
use crate::engine::{Clock, CountdownEngine, SystemClock, TimerEvent};
use crate::entry::{CustomTimeEntry, EntryError, ZERO_DURATION_MESSAGE};
use crate::notification::{NotificationError, NotificationSender};
use crate::sound::{SoundError, SoundPlayer};
use crate::types::Theme;

/// The focus timer application state.
pub struct App<C: Clock = SystemClock> {
    engine: CountdownEngine<C>,
    sound: Option<Rc<dyn SoundPlayer>>,
    notifier: Option<Rc<dyn NotificationSender>>,
    backdrop: Backdrop,
    mode: Mode,
    entry: CustomTimeEntry,
    /// Preset durations in minutes
    presets: Vec<u32>,
    music_on: bool,
    /// Message shown in the custom dialog
    message: Option<String>,
    bell_pending: bool,
    quit: bool,
}

impl<C: Clock> App<C> {
    pub fn new(engine: CountdownEngine<C>, backdrop: Backdrop, presets: Vec<u32>) -> Self {
        Self {
            engine,
            sound: None,
            notifier: None,
            backdrop,
            mode: Mode::Normal,
            entry: CustomTimeEntry::new(),
            presets,
            music_on: true,
            message: None,
            bell_pending: false,
            quit: false,
        }
    }

    #[must_use]
    pub fn with_sound(mut self, sound: Option<Rc<dyn SoundPlayer>>) -> Self {
        self.sound = sound;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn NotificationSender>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn with_music(mut self, music_on: bool) -> Self {
        self.music_on = music_on;
        self
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Applies a user action.
    pub fn handle_action(&mut self, action: Action) {
        debug!("Action: {}", action);

        match action {
            Action::ToggleRunning => {
                if self.engine.is_running() {
                    self.pause();
                } else {
                    self.start();
                }
            }
            Action::Reset => self.reset(),
            Action::Preset(index) => self.select_preset(index),
            Action::OpenCustomEntry => {
                self.entry.clear();
                self.message = None;
                self.mode = Mode::CustomEntry;
            }
            Action::EntryDigit(digit) => self.entry.push_digit(digit),
            Action::EntryUnit(unit) => self.entry.select_unit(unit),
            Action::EntrySubmit => self.submit_entry(),
            Action::EntryCancel => {
                self.message = None;
                self.mode = Mode::Normal;
            }
            Action::SwitchTheme => {
                self.backdrop.switch();
            }
            Action::ToggleMusic => self.toggle_music(),
            Action::Acknowledge => {
                if let Some(sound) = self.sound.as_deref() {
                    sound.stop_alarm();
                }
                self.mode = Mode::Normal;
            }
            Action::Quit => {
                if let Some(sound) = self.sound.as_deref() {
                    sound.stop_music();
                    sound.stop_alarm();
                }
                self.quit = true;
            }
        }
    }

    /// Starts the countdown, restarting the music from the beginning.
    pub fn start(&mut self) {
        if !self.engine.start() {
            return;
        }
        if let Some(sound) = self.sound.as_deref() {
            sound.stop_alarm();
            if self.music_on {
                log_sound_error("start music", sound.start_music());
            }
        }
    }

    /// Pauses a running countdown and its music. Does nothing when stopped.
    pub fn pause(&mut self) {
        if !self.engine.pause() {
            return;
        }
        if let Some(sound) = self.sound.as_deref() {
            sound.pause_music();
            sound.stop_alarm();
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        if let Some(sound) = self.sound.as_deref() {
            sound.stop_music();
            sound.stop_alarm();
        }
    }

    /// Pauses explicitly, then loads the preset duration.
    fn select_preset(&mut self, index: usize) {
        let Some(minutes) = self.presets.get(index).copied() else {
            debug!("No preset at index {}", index);
            return;
        };

        self.pause();
        if let Err(e) = self.engine.set_duration(minutes * 60) {
            warn!("Failed to apply preset: {}", e);
        }
    }

    fn submit_entry(&mut self) {
        match self.entry.submit() {
            Ok(total) => {
                self.pause();
                if let Err(e) = self.engine.set_duration(total) {
                    warn!("Failed to apply custom time: {}", e);
                }
                self.message = None;
                self.mode = Mode::Normal;
            }
            Err(EntryError::ZeroDuration) => {
                self.message = Some(ZERO_DURATION_MESSAGE.to_string());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn toggle_music(&mut self) {
        self.music_on = !self.music_on;
        debug!("Music {}", if self.music_on { "on" } else { "off" });

        if !self.engine.is_running() {
            return;
        }
        if let Some(sound) = self.sound.as_deref() {
            if self.music_on {
                log_sound_error("resume music", sound.resume_music());
            } else {
                sound.pause_music();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Engine
    // ------------------------------------------------------------------------

    /// Recomputes the remaining time. Called when the poll handle fires.
    pub fn poll(&mut self) -> Option<u32> {
        self.engine.poll()
    }

    /// Reacts to an engine event.
    pub fn handle_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Expired => self.on_expired(),
            TimerEvent::RemainingChanged { .. } => {}
            other => debug!("Timer event: {:?}", other),
        }
    }

    fn on_expired(&mut self) {
        if let Some(sound) = self.sound.as_deref() {
            sound.stop_music();
            log_sound_error("play alarm", sound.play_alarm());
        }

        if let Some(notifier) = self.notifier.as_deref() {
            match notifier.send_expired() {
                Ok(()) | Err(NotificationError::Disabled) => {}
                Err(e) => warn!("Failed to send notification: {} ({})", e, e.suggestion()),
            }
        }

        self.bell_pending = true;
        self.message = None;
        self.mode = Mode::TimeUp;
    }

    // ------------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------------

    /// Advances the background animation by one frame.
    pub fn step_frame(&mut self) {
        self.backdrop.step();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.backdrop.resize(width, height);
    }

    /// Returns true once if the bell should be rung.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn engine(&self) -> &CountdownEngine<C> {
        &self.engine
    }

    /// Mutable access for the event loop, which awaits `next_poll`.
    pub fn engine_mut(&mut self) -> &mut CountdownEngine<C> {
        &mut self.engine
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn entry(&self) -> &CustomTimeEntry {
        &self.entry
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn presets(&self) -> &[u32] {
        &self.presets
    }

    pub fn theme(&self) -> Theme {
        self.backdrop.theme()
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

fn log_sound_error(what: &str, result: Result<(), SoundError>) {
    if let Err(e) = result {
        if e.is_device_error() {
            warn!("Failed to {}: {}", what, e);
        } else {
            debug!("Failed to {}: {}", what, e);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
