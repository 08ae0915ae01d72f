//! Notification system error types.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to send a notification.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// Notifications are turned off.
    #[error("notifications are disabled")]
    Disabled,
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "check that a notification daemon is running",
            Self::Disabled => "enable notifications in the config file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::SendFailed("no dbus".to_string());
        assert!(err.to_string().contains("no dbus"));

        let err = NotificationError::Disabled;
        assert_eq!(err.to_string(), "notifications are disabled");
    }

    #[test]
    fn test_suggestion() {
        assert!(NotificationError::SendFailed("x".into())
            .suggestion()
            .contains("daemon"));
        assert!(NotificationError::Disabled.suggestion().contains("config"));
    }
}
