//! The notification gate.
//!
//! Tracks whether notification permission was granted (queried, and
//! requested if absent, once at daemon startup) and exposes a single
//! `announce` operation that:
//!
//! - is a no-op when permission is absent (no delivery, no cue sound)
//! - otherwise delivers a desktop notification fire-and-forget and plays
//!   the cue sound alongside it
//!
//! Neither a delivery failure nor a cue failure reaches the timer; both
//! are logged and swallowed.

mod content;
mod desktop;
pub mod error;

use std::sync::Arc;

use tracing::{debug, warn};

pub use self::content::{rest_started_content, work_started_content, AnnounceContent};
pub use self::desktop::DesktopNotifier;
pub use self::error::NotificationError;

use crate::sound::{get_default_sound, SoundPlayer};

// ============================================================================
// Notifier
// ============================================================================

/// The notification boundary: two capability operations and one
/// fire-and-forget delivery action.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Queries whether notification permission is currently granted.
    async fn is_permission_granted(&self) -> bool;

    /// Requests permission; returns whether it was granted.
    async fn request_permission(&self) -> bool;

    /// Delivers a notification with the given title and body.
    fn deliver(&self, title: &str, body: &str) -> Result<(), NotificationError>;
}

// ============================================================================
// NotificationGate
// ============================================================================

/// Permission-gated announcer for cycle transitions.
pub struct NotificationGate<N: Notifier, P: SoundPlayer> {
    /// Permission flag, resolved once at startup
    permitted: bool,
    /// Delivery backend
    notifier: N,
    /// Cue-sound player; None when no audio device is available
    player: Option<Arc<P>>,
}

impl<N: Notifier, P: SoundPlayer> NotificationGate<N, P> {
    /// Creates the gate, resolving the permission flag exactly once:
    /// queries the current permission and requests it if absent.
    ///
    /// A denied permission is not an error; announcements silently become
    /// no-ops and the timer is unaffected.
    pub async fn init(notifier: N, player: Option<Arc<P>>) -> Self {
        let mut permitted = notifier.is_permission_granted().await;
        if !permitted {
            permitted = notifier.request_permission().await;
        }
        if !permitted {
            warn!("notification permission not granted; announcements are disabled");
        }

        Self {
            permitted,
            notifier,
            player,
        }
    }

    /// Returns whether announcements will be delivered.
    pub fn is_permitted(&self) -> bool {
        self.permitted
    }

    /// Returns a reference to the delivery backend.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Announces a cycle transition: delivers the notification and plays
    /// the cue sound. A no-op without permission.
    pub fn announce(&self, content: &AnnounceContent) {
        if !self.permitted {
            debug!(title = content.title, "announcement skipped: no permission");
            return;
        }

        if let Err(e) = self.notifier.deliver(content.title, content.body) {
            warn!("failed to deliver notification: {e}");
        }

        if let Some(player) = &self.player {
            if let Err(e) = player.play(&get_default_sound()) {
                warn!("failed to play cue sound: {e}");
            }
        }
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// Mock notification backend for testing.
#[derive(Debug)]
pub struct MockNotifier {
    granted: bool,
    deliveries: std::sync::Mutex<Vec<(String, String)>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    /// Creates a mock that reports permission granted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            granted: true,
            deliveries: std::sync::Mutex::new(Vec::new()),
            should_fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Creates a mock that denies permission, both on query and request.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            granted: false,
            ..Self::new()
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn deliveries(&self) -> Vec<(String, String)> {
        self.deliveries.lock().unwrap().clone()
    }

    #[must_use]
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

impl Notifier for MockNotifier {
    async fn is_permission_granted(&self) -> bool {
        self.granted
    }

    async fn request_permission(&self) -> bool {
        self.granted
    }

    fn deliver(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("mock failure".to_string()));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
