//! Countdown engine error types.

use std::fmt;

use thiserror::Error;

/// Why a duration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDurationReason {
    /// The duration was zero.
    NotPositive,
    /// The engine was running; it must be paused first.
    WhileRunning,
}

impl fmt::Display for InvalidDurationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "duration must be greater than zero"),
            Self::WhileRunning => write!(f, "pause the timer before changing its duration"),
        }
    }
}

/// Errors returned by the countdown engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A duration was rejected; the engine state is unchanged.
    #[error("invalid duration {seconds}s: {reason}")]
    InvalidDuration {
        seconds: u32,
        reason: InvalidDurationReason,
    },
}

impl EngineError {
    /// Returns the rejection reason.
    #[must_use]
    pub fn reason(&self) -> InvalidDurationReason {
        match self {
            Self::InvalidDuration { reason, .. } => *reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidDuration {
            seconds: 0,
            reason: InvalidDurationReason::NotPositive,
        };
        assert!(err.to_string().contains("0s"));
        assert!(err.to_string().contains("greater than zero"));

        let err = EngineError::InvalidDuration {
            seconds: 300,
            reason: InvalidDurationReason::WhileRunning,
        };
        assert!(err.to_string().contains("300s"));
        assert!(err.to_string().contains("pause"));
    }

    #[test]
    fn test_reason() {
        let err = EngineError::InvalidDuration {
            seconds: 60,
            reason: InvalidDurationReason::WhileRunning,
        };
        assert_eq!(err.reason(), InvalidDurationReason::WhileRunning);
    }
}
