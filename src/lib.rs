//! Yeux - a 20-20-20 eye-rest reminder
//!
//! This library provides the core functionality for the Yeux daemon and CLI.
//! It includes:
//! - Timer engine driving the work ↔ rest cycle (20 min / 20 sec)
//! - Derived view values: countdown display, circular progress, elapsed flags
//! - Permission-gated desktop notifications with a cue sound
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities

pub mod cli;
pub mod daemon;
pub mod notification;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    IpcRequest, IpcResponse, Status, TimerSnapshot, TimerState, WorkClock,
    REST_TIME_TOTAL_SECONDS, WORK_TIME_START,
};

// Re-export engine types
pub use daemon::{drive, TimerEngine, TimerEvent};

// Re-export notification types
pub use notification::{
    rest_started_content, work_started_content, AnnounceContent, DesktopNotifier, MockNotifier,
    NotificationError, NotificationGate, Notifier,
};

// Re-export sound types
pub use sound::{
    discover_system_sounds, get_default_sound, try_create_player, MockSoundPlayer,
    RodioSoundPlayer, SoundError, SoundPlayer, SoundSource,
};
