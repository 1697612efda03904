//! Notification system error types.

use thiserror::Error;

/// Errors that can occur when delivering a notification.
///
/// None of these propagate into the timer: announcements are
/// fire-and-forget and failures are logged and swallowed by the gate.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to hand the notification to the desktop.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// No notification service is reachable on this desktop.
    #[error("notification service unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::SendFailed("dbus timeout".to_string());
        assert!(err.to_string().contains("dbus timeout"));

        let err = NotificationError::Unavailable("no server".to_string());
        assert!(err.to_string().contains("no server"));
    }
}
