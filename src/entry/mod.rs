//! Custom time entry.
//!
//! Models the digit-pad dialog used to type an arbitrary duration: three
//! two-digit fields (hours, minutes, seconds), one of which is selected at a
//! time. Typing a digit shifts it into the selected field, keeping the last
//! two digits. Also parses `HH:MM:SS` strings for the command line.

use std::fmt;

use thiserror::Error;

/// Message shown when the entered duration is zero.
pub const ZERO_DURATION_MESSAGE: &str = "Please set a time greater than 0.";

/// Errors from custom time entry and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The entered duration adds up to zero.
    #[error("Please set a time greater than 0.")]
    ZeroDuration,

    /// The text is not `HH:MM:SS`, `MM:SS` or `SS`.
    #[error("invalid time '{0}', expected HH:MM:SS, MM:SS or SS")]
    Malformed(String),

    /// The duration does not fit in the timer.
    #[error("time '{0}' is too long")]
    TooLong(String),
}

/// Field of the entry dialog that receives digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Short label used on the dialog.
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "hr",
            TimeUnit::Minutes => "min",
            TimeUnit::Seconds => "sec",
        }
    }
}

/// State of the custom time dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTimeEntry {
    hours: u8,
    minutes: u8,
    seconds: u8,
    unit: TimeUnit,
}

impl Default for CustomTimeEntry {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            unit: TimeUnit::Minutes,
        }
    }
}

impl CustomTimeEntry {
    /// Creates an empty entry with minutes selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all fields and selects minutes again.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the selected unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Selects the field that receives digits.
    pub fn select_unit(&mut self, unit: TimeUnit) {
        self.unit = unit;
    }

    /// Shifts a digit into the selected field, keeping the last two digits.
    ///
    /// Values above 9 are ignored.
    pub fn push_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let field = self.field_mut();
        *field = (*field % 10) * 10 + digit;
    }

    /// Returns the current value of a field.
    pub fn value(&self, unit: TimeUnit) -> u8 {
        match unit {
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Seconds => self.seconds,
        }
    }

    /// Total duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }

    /// Returns the total if it is positive.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::ZeroDuration` when all fields are zero.
    pub fn submit(&self) -> Result<u32, EntryError> {
        match self.total_seconds() {
            0 => Err(EntryError::ZeroDuration),
            total => Ok(total),
        }
    }

    fn field_mut(&mut self) -> &mut u8 {
        match self.unit {
            TimeUnit::Hours => &mut self.hours,
            TimeUnit::Minutes => &mut self.minutes,
            TimeUnit::Seconds => &mut self.seconds,
        }
    }
}

impl fmt::Display for CustomTimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Parses `HH:MM:SS`, `MM:SS` or `SS` into a positive number of seconds.
///
/// Fields after the first are limited to two digits, but are not required
/// to be below 60 (the entry dialog allows `00:90:00` as well).
///
/// # Errors
///
/// Returns `Malformed` for anything else, `ZeroDuration` for a zero total
/// and `TooLong` if the total overflows.
pub fn parse_clock_time(input: &str) -> Result<u32, EntryError> {
    let malformed = || EntryError::Malformed(input.to_string());

    let parts: Vec<&str> = input.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(malformed());
    }

    let mut total: u64 = 0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        if i > 0 && part.len() > 2 {
            return Err(malformed());
        }
        let value: u64 = part.parse().map_err(|_| malformed())?;
        total = total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(|| EntryError::TooLong(input.to_string()))?;
    }

    match u32::try_from(total) {
        Ok(0) => Err(EntryError::ZeroDuration),
        Ok(secs) => Ok(secs),
        Err(_) => Err(EntryError::TooLong(input.to_string())),
    }
}
