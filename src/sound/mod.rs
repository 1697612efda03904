//! Cue-sound playback for transition announcements.
//!
//! This module provides the audio half of an announcement:
//!
//! - System sound discovery with an embedded fallback click
//! - Non-blocking playback through rodio
//! - Graceful degradation when no audio device is available

mod embedded;
mod error;
mod player;
mod source;

pub use embedded::{get_embedded_cue, DEFAULT_CUE_DATA};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{discover_system_sounds, get_default_sound, SoundSource};

/// Trait for cue-sound playback implementations.
///
/// Abstracts the playback so the notification gate can run against rodio
/// in the daemon and a mock in tests.
pub trait SoundPlayer {
    /// Plays a sound from the given source, non-blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock cue player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: std::sync::Mutex<Vec<SoundSource>>,
    disabled: std::sync::atomic::AtomicBool,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("mock failure".to_string()));
        }
        if self.disabled.load(std::sync::atomic::Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}
