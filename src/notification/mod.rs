//! Desktop notification on expiry.
//!
//! Uses `notify-rust`, which talks to the freedesktop notification server on
//! Linux/BSD and to the native notification centres elsewhere. Sending is
//! best effort: callers log failures and carry on.

mod content;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

pub use self::content::{NotificationContent, APP_NAME};
pub use self::error::NotificationError;

/// Trait for notification senders.
pub trait NotificationSender {
    /// Announces that the countdown expired.
    fn send_expired(&self) -> Result<(), NotificationError>;
}

/// Sends notifications through the desktop notification server.
#[derive(Debug)]
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl NotificationSender for DesktopNotifier {
    fn send_expired(&self) -> Result<(), NotificationError> {
        if !self.enabled {
            return Err(NotificationError::Disabled);
        }

        NotificationContent::expired()
            .to_notification()
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        debug!("Expiry notification sent");
        Ok(())
    }
}

/// Mock notification sender for testing.
#[derive(Debug, Default)]
pub struct MockNotificationSender {
    sent: Mutex<Vec<NotificationContent>>,
    should_fail: AtomicBool,
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn sent(&self) -> Vec<NotificationContent> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSender for MockNotificationSender {
    fn send_expired(&self) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push(NotificationContent::expired());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_desktop_notifier() {
        let notifier = DesktopNotifier::new(false);
        assert!(matches!(
            notifier.send_expired(),
            Err(NotificationError::Disabled)
        ));
    }

    #[test]
    fn test_mock_records_notifications() {
        let mock = MockNotificationSender::new();

        mock.send_expired().unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].summary, "Pomodoro Complete");
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockNotificationSender::new();
        mock.set_should_fail(true);

        assert!(mock.send_expired().is_err());
        assert!(mock.sent().is_empty());
    }
}
