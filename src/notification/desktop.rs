//! Desktop notification backend using notify-rust.

use tracing::debug;

use super::error::NotificationError;
use super::Notifier;

/// Application name shown by the desktop notification service.
const APP_NAME: &str = "yeux";

/// Delivers announcements through the desktop notification service.
///
/// On XDG desktops the permission probe asks the notification server for
/// its capabilities; a server that answers counts as granted. macOS and
/// Windows deliver without an explicit grant, so the probe reports true.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Creates a new desktop notifier.
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    async fn is_permission_granted(&self) -> bool {
        probe_notification_server()
    }

    async fn request_permission(&self) -> bool {
        // There is no separate grant dialog on the supported desktops;
        // requesting is another probe of the service.
        probe_notification_server()
    }

    fn deliver(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        debug!(title, "delivering desktop notification");
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .appname(APP_NAME)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_notification_server() -> bool {
    match notify_rust::get_capabilities() {
        Ok(capabilities) => {
            debug!(?capabilities, "notification server reachable");
            true
        }
        Err(e) => {
            tracing::warn!("notification server not reachable: {e}");
            false
        }
    }
}

#[cfg(any(not(unix), target_os = "macos"))]
fn probe_notification_server() -> bool {
    true
}
