//! Cue-sound player implementation using rodio.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::get_embedded_cue;
use super::error::SoundError;
use super::source::SoundSource;

/// A cue-sound player backed by rodio.
///
/// The player is thread-safe and can be shared across tasks with `Arc`.
/// Playback is non-blocking; the cue continues in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new cue player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all playback is silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Creates a disabled player: all calls to `play` silently succeed.
    ///
    /// # Errors
    ///
    /// May still fail if the audio stream cannot be initialized.
    pub fn disabled() -> Result<Self, SoundError> {
        Self::new(true)
    }

    /// Plays a cue from the given source, non-blocking.
    ///
    /// A system sound that fails to play falls back to the embedded click.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the audio format
    /// cannot be decoded, or playback fails.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::System { path, name } => {
                debug!("playing system sound: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(
                            "failed to play system sound '{}': {}, falling back to embedded",
                            name, e
                        );
                        self.play_embedded()
                    }
                }
            }
            SoundSource::Embedded { name } => {
                debug!("playing embedded sound: {}", name);
                self.play_embedded()
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let reader = BufReader::new(file);
        let decoder = Decoder::new(reader).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.play_decoder(decoder)
    }

    /// Plays the embedded fallback click.
    fn play_embedded(&self) -> Result<(), SoundError> {
        let cursor = Cursor::new(get_embedded_cue());
        let decoder = Decoder::new(cursor)
            .map_err(|e| SoundError::DecodeError(format!("embedded sound: {}", e)))?;

        self.play_decoder(decoder)
    }

    /// Plays a decoded audio source on a detached sink.
    fn play_decoder<R>(&self, decoder: Decoder<R>) -> Result<(), SoundError>
    where
        R: std::io::Read + std::io::Seek + Send + Sync + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        Ok(())
    }

    /// Returns true if playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    /// Disables playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a cue player, returning None if audio is unavailable.
///
/// If audio initialization fails a warning is logged and the gate runs
/// without a cue sound.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("audio not available, cue sound disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests may run in environments without audio hardware (CI
    // containers); they skip themselves when no device exists.

    #[test]
    fn test_disabled_player_skips_playback() {
        let player = match RodioSoundPlayer::disabled() {
            Ok(p) => p,
            Err(_) => return, // Skip test if no audio
        };

        assert!(player.is_disabled());

        let source = SoundSource::embedded("test");
        assert!(player.play(&source).is_ok());
    }

    #[test]
    fn test_enable_disable() {
        let player = match RodioSoundPlayer::disabled() {
            Ok(p) => p,
            Err(_) => return,
        };

        player.enable();
        assert!(!player.is_disabled());

        player.disable();
        assert!(player.is_disabled());
    }

    #[test]
    fn test_try_create_player_never_panics() {
        let _ = try_create_player(true);
    }

    #[test]
    fn test_play_nonexistent_file_falls_back() {
        let player = match RodioSoundPlayer::new(false) {
            Ok(p) => p,
            Err(_) => return,
        };

        let source = SoundSource::system("Missing", "/nonexistent/path/to/sound.wav");

        // Should fall back to the embedded click and succeed.
        let _ = player.play(&source);
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioSoundPlayer::disabled() {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(format!("{:?}", player).contains("RodioSoundPlayer"));
    }
}
