//! Key handling for the terminal front end.
//!
//! Translates crossterm key events into [`Action`]s. The mapping depends on
//! the current [`Mode`] and is pure, so it is tested without a terminal.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entry::TimeUnit;

// ============================================================================
// Mode
// ============================================================================

/// What the screen is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The countdown itself
    #[default]
    Normal,
    /// The custom time dialog
    CustomEntry,
    /// The time-up dialog shown after expiry
    TimeUp,
}

// ============================================================================
// Action
// ============================================================================

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start when stopped, pause when running
    ToggleRunning,
    Reset,
    /// Select the preset at this index (0-based)
    Preset(usize),
    OpenCustomEntry,
    EntryDigit(u8),
    EntryUnit(TimeUnit),
    EntrySubmit,
    EntryCancel,
    SwitchTheme,
    ToggleMusic,
    /// Dismiss the time-up dialog
    Acknowledge,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ToggleRunning => write!(f, "start/pause"),
            Action::Reset => write!(f, "reset"),
            Action::Preset(i) => write!(f, "preset {}", i + 1),
            Action::OpenCustomEntry => write!(f, "custom"),
            Action::EntryDigit(d) => write!(f, "digit {d}"),
            Action::EntryUnit(unit) => write!(f, "unit {}", unit.label()),
            Action::EntrySubmit => write!(f, "set"),
            Action::EntryCancel => write!(f, "cancel"),
            Action::SwitchTheme => write!(f, "theme"),
            Action::ToggleMusic => write!(f, "music"),
            Action::Acknowledge => write!(f, "ok"),
            Action::Quit => write!(f, "quit"),
        }
    }
}

/// Maps a key event to an action for the given mode.
///
/// Returns `None` for key releases and keys with no binding.
pub fn map_key(mode: Mode, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        Mode::Normal => map_normal(key.code),
        Mode::CustomEntry => map_entry(key.code),
        Mode::TimeUp => map_time_up(key.code),
    }
}

fn map_normal(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleRunning),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Preset(digit(c) - 1)),
        KeyCode::Char('c') => Some(Action::OpenCustomEntry),
        KeyCode::Char('t') => Some(Action::SwitchTheme),
        KeyCode::Char('m') => Some(Action::ToggleMusic),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn map_entry(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(c @ '0'..='9') => Some(Action::EntryDigit(digit(c) as u8)),
        KeyCode::Char('h') => Some(Action::EntryUnit(TimeUnit::Hours)),
        KeyCode::Char('m') => Some(Action::EntryUnit(TimeUnit::Minutes)),
        KeyCode::Char('s') => Some(Action::EntryUnit(TimeUnit::Seconds)),
        KeyCode::Enter => Some(Action::EntrySubmit),
        KeyCode::Esc => Some(Action::EntryCancel),
        _ => None,
    }
}

fn map_time_up(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => Some(Action::Acknowledge),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn digit(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    mod normal_tests {
        use super::*;

        #[test]
        fn test_toggle_keys() {
            assert_eq!(
                map_key(Mode::Normal, press(KeyCode::Char(' '))),
                Some(Action::ToggleRunning)
            );
            assert_eq!(
                map_key(Mode::Normal, press(KeyCode::Enter)),
                Some(Action::ToggleRunning)
            );
        }

        #[test]
        fn test_presets_are_zero_based() {
            assert_eq!(
                map_key(Mode::Normal, press(KeyCode::Char('1'))),
                Some(Action::Preset(0))
            );
            assert_eq!(
                map_key(Mode::Normal, press(KeyCode::Char('9'))),
                Some(Action::Preset(8))
            );
            assert_eq!(map_key(Mode::Normal, press(KeyCode::Char('0'))), None);
        }

        #[test]
        fn test_other_bindings() {
            let cases = [
                ('r', Action::Reset),
                ('c', Action::OpenCustomEntry),
                ('t', Action::SwitchTheme),
                ('m', Action::ToggleMusic),
                ('q', Action::Quit),
            ];
            for (c, action) in cases {
                assert_eq!(map_key(Mode::Normal, press(KeyCode::Char(c))), Some(action));
            }
            assert_eq!(map_key(Mode::Normal, press(KeyCode::Esc)), Some(Action::Quit));
        }

        #[test]
        fn test_ctrl_c_quits_in_every_mode() {
            let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            for mode in [Mode::Normal, Mode::CustomEntry, Mode::TimeUp] {
                assert_eq!(map_key(mode, key), Some(Action::Quit));
            }
        }

        #[test]
        fn test_release_ignored() {
            let mut key = press(KeyCode::Char(' '));
            key.kind = KeyEventKind::Release;
            assert_eq!(map_key(Mode::Normal, key), None);
        }
    }

    mod entry_tests {
        use super::*;

        #[test]
        fn test_digits() {
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Char('0'))),
                Some(Action::EntryDigit(0))
            );
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Char('7'))),
                Some(Action::EntryDigit(7))
            );
        }

        #[test]
        fn test_units() {
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Char('h'))),
                Some(Action::EntryUnit(TimeUnit::Hours))
            );
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Char('m'))),
                Some(Action::EntryUnit(TimeUnit::Minutes))
            );
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Char('s'))),
                Some(Action::EntryUnit(TimeUnit::Seconds))
            );
        }

        #[test]
        fn test_submit_and_cancel() {
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Enter)),
                Some(Action::EntrySubmit)
            );
            assert_eq!(
                map_key(Mode::CustomEntry, press(KeyCode::Esc)),
                Some(Action::EntryCancel)
            );
            // 'q' is not a quit key while typing
            assert_eq!(map_key(Mode::CustomEntry, press(KeyCode::Char('q'))), None);
        }
    }

    mod time_up_tests {
        use super::*;

        #[test]
        fn test_acknowledge_keys() {
            for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('o')] {
                assert_eq!(map_key(Mode::TimeUp, press(code)), Some(Action::Acknowledge));
            }
        }

        #[test]
        fn test_normal_keys_inactive() {
            assert_eq!(map_key(Mode::TimeUp, press(KeyCode::Char('r'))), None);
            assert_eq!(
                map_key(Mode::TimeUp, press(KeyCode::Char('q'))),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Preset(2).to_string(), "preset 3");
        assert_eq!(Action::EntryUnit(TimeUnit::Hours).to_string(), "unit hr");
    }
}
