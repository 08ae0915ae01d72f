//! Application configuration.
//!
//! Settings are read from a JSON file. Every field has a default, so a
//! partial file (or no file at all) is valid. The default location is
//! `<config_dir>/focus-timer/config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::Theme;

/// Longest duration accepted anywhere, in minutes (99:59:00).
pub const MAX_MINUTES: u32 = 99 * 60 + 59;

/// Number of preset keys (`1`-`9`).
pub const MAX_PRESETS: usize = 9;

fn default_minutes() -> u32 {
    25
}

fn default_presets() -> Vec<u32> {
    vec![25, 15, 5]
}

fn default_true() -> bool {
    true
}

fn default_frame_interval_ms() -> u64 {
    100
}

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Sound settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoundConfig {
    /// Master switch for all audio.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether background music plays while the timer runs.
    #[serde(default = "default_true")]
    pub music: bool,

    /// Alarm file played on expiry; a synthesized beep is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_file: Option<PathBuf>,

    /// Looping background music file; no music plays when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_file: Option<PathBuf>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music: true,
            alarm_file: None,
            music_file: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Duration loaded at startup and restored by reset, in minutes.
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,

    /// Preset durations in minutes, bound to keys `1`-`9` in order.
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,

    /// Background theme at startup.
    #[serde(default)]
    pub theme: Theme,

    /// Whether a desktop notification is sent on expiry.
    #[serde(default = "default_true")]
    pub notifications: bool,

    #[serde(default)]
    pub sound: SoundConfig,

    /// Animation frame interval in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            presets: default_presets(),
            theme: Theme::default(),
            notifications: true,
            sound: SoundConfig::default(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Returns the default config file location, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("focus-timer").join("config.json"))
    }

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and defaults are used when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", path.display());
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_MINUTES).contains(&self.default_minutes) {
            return Err(ConfigError::Invalid(format!(
                "default_minutes must be within 1-{}",
                MAX_MINUTES
            )));
        }
        if self.presets.is_empty() || self.presets.len() > MAX_PRESETS {
            return Err(ConfigError::Invalid(format!(
                "presets must contain 1-{} entries",
                MAX_PRESETS
            )));
        }
        if let Some(bad) = self.presets.iter().find(|m| !(1..=MAX_MINUTES).contains(*m)) {
            return Err(ConfigError::Invalid(format!(
                "preset {} is outside 1-{} minutes",
                bad, MAX_MINUTES
            )));
        }
        if !(16..=1000).contains(&self.frame_interval_ms) {
            return Err(ConfigError::Invalid(
                "frame_interval_ms must be within 16-1000".to_string(),
            ));
        }
        Ok(())
    }

    /// Default duration in seconds.
    pub fn default_seconds(&self) -> u32 {
        self.default_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_minutes, 25);
        assert_eq!(config.presets, vec![25, 15, 5]);
        assert_eq!(config.theme, Theme::Snow);
        assert!(config.notifications);
        assert!(config.sound.enabled);
        assert!(config.sound.music);
        assert!(config.sound.alarm_file.is_none());
        assert_eq!(config.frame_interval_ms, 100);
        assert_eq!(config.default_seconds(), 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{
            "default_minutes": 50,
            "theme": "leaves",
            "sound": { "music": false }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.default_minutes, 50);
        assert_eq!(config.theme, Theme::Leaves);
        assert!(config.sound.enabled);
        assert!(!config.sound.music);
        assert_eq!(config.presets, vec![25, 15, 5]);
    }

    #[test]
    fn test_serialize_skips_missing_files() {
        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        assert!(!json.contains("alarm_file"));
        assert!(!json.contains("music_file"));
        assert!(json.contains("\"theme\":\"snow\""));
    }

    #[test]
    fn test_validate_default_minutes() {
        let config = AppConfig {
            default_minutes: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig {
            default_minutes: MAX_MINUTES + 1,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_presets() {
        let config = AppConfig {
            presets: vec![],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            presets: vec![5; 10],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            presets: vec![25, 0],
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("preset 0"));
    }

    #[test]
    fn test_validate_frame_interval() {
        let config = AppConfig {
            frame_interval_ms: 5,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_minutes": 10, "presets": [10, 2]}}"#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.default_minutes, 10);
        assert_eq!(config.presets, vec![10, 2]);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_minutes": 0}}"#).unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = AppConfig::default_path() {
            assert!(path.ends_with("focus-timer/config.json"));
        }
    }
}
