//! Sound source selection.
//!
//! The alarm is either a user-supplied file or a synthesized beep pattern.
//! Background music is always a file.

use std::path::{Path, PathBuf};

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the file.
        path: PathBuf,
    },
    /// The built-in beep pattern.
    Beep,
}

impl SoundSource {
    /// Creates a file source, naming it after the file stem.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Uses the configured file if there is one, the beep otherwise.
    #[must_use]
    pub fn alarm(configured: Option<&Path>) -> Self {
        configured.map_or(Self::Beep, Self::file)
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Beep => "beep",
        }
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Beep => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source() {
        let source = SoundSource::file("/music/lofi-loop.mp3");
        assert_eq!(source.name(), "lofi-loop");
        assert_eq!(source.path(), Some(Path::new("/music/lofi-loop.mp3")));
    }

    #[test]
    fn test_beep_source() {
        let source = SoundSource::Beep;
        assert_eq!(source.name(), "beep");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_alarm_selection() {
        assert_eq!(SoundSource::alarm(None), SoundSource::Beep);

        let source = SoundSource::alarm(Some(Path::new("/sounds/alarm.wav")));
        assert_eq!(source.name(), "alarm");
    }
}
