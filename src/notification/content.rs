//! Notification content construction.

use notify_rust::{Notification, Timeout};

/// Application name reported to the notification server.
pub const APP_NAME: &str = "focus-timer";

/// Content of a desktop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub summary: String,
    pub body: String,
    pub icon: String,
}

impl NotificationContent {
    /// Content sent when the countdown expires.
    #[must_use]
    pub fn expired() -> Self {
        Self {
            summary: "Pomodoro Complete".to_string(),
            body: "Time\u{2019}s up! Take a break.".to_string(),
            icon: "alarm-clock".to_string(),
        }
    }

    /// Builds the `notify-rust` notification.
    ///
    /// The notification stays until dismissed, like the time-up dialog.
    #[must_use]
    pub fn to_notification(&self) -> Notification {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(&self.summary)
            .body(&self.body)
            .icon(&self.icon)
            .timeout(Timeout::Never);
        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(notify_rust::Urgency::Critical);
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_content() {
        let content = NotificationContent::expired();
        assert_eq!(content.summary, "Pomodoro Complete");
        assert!(content.body.contains("Take a break"));
    }

    #[test]
    fn test_to_notification() {
        let notification = NotificationContent::expired().to_notification();
        assert_eq!(notification.summary, "Pomodoro Complete");
        assert_eq!(notification.appname, APP_NAME);
    }
}
