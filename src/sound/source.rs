//! Cue-sound source management.
//!
//! Finds a suitable short system sound for the announcement cue, falling
//! back to the embedded click when none exists.

use std::path::PathBuf;

/// Represents the source of a cue sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A system sound shipped with the desktop.
    System {
        /// The name of the sound (e.g. "Glass" or "complete").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// The embedded sound compiled into the binary.
    Embedded {
        /// The name of the embedded sound.
        name: String,
    },
}

impl SoundSource {
    /// Creates a new system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a new embedded sound source.
    #[must_use]
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::Embedded { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::System { name, .. } | Self::Embedded { name } => name,
        }
    }

    /// Returns true if this is a system sound.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    /// Returns true if this is the embedded sound.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    /// Returns the file path if this is a system sound.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::System { path, .. } => Some(path),
            Self::Embedded { .. } => None,
        }
    }
}

/// Directories to search for system sounds, in order of priority.
#[cfg(target_os = "macos")]
const SYSTEM_SOUND_DIRS: &[&str] = &["/System/Library/Sounds", "/Library/Sounds"];

#[cfg(not(target_os = "macos"))]
const SYSTEM_SOUND_DIRS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo",
    "/usr/local/share/sounds/freedesktop/stereo",
];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "oga", "ogg", "mp3", "flac"];

/// Cue sound names to try, in order of preference, covering both the macOS
/// and freedesktop sound sets.
const DEFAULT_CUE_NAMES: &[&str] = &["Glass", "Ping", "complete", "bell", "message"];

/// Discovers available system sounds.
///
/// Scans the system sound directories and returns a list of available
/// sounds, sorted by name. Returns an empty vector if none are found.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds = Vec::new();

    for dir in SYSTEM_SOUND_DIRS {
        let path = PathBuf::from(dir);
        if !path.exists() {
            continue;
        }

        if let Ok(entries) = std::fs::read_dir(&path) {
            for entry in entries.flatten() {
                let file_path = entry.path();
                if let Some(ext) = file_path.extension() {
                    let ext_str = ext.to_string_lossy().to_lowercase();
                    if SUPPORTED_EXTENSIONS.contains(&ext_str.as_str()) {
                        if let Some(stem) = file_path.file_stem() {
                            sounds.push(SoundSource::System {
                                name: stem.to_string_lossy().into_owned(),
                                path: file_path,
                            });
                        }
                    }
                }
            }
        }
    }

    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

/// Picks the cue sound for announcements.
///
/// Prefers a short system sound, falling back to the embedded click when
/// no system sounds are available.
#[must_use]
pub fn get_default_sound() -> SoundSource {
    let system_sounds = discover_system_sounds();

    for preferred_name in DEFAULT_CUE_NAMES {
        if let Some(sound) = system_sounds.iter().find(|s| s.name() == *preferred_name) {
            return sound.clone();
        }
    }

    if let Some(first) = system_sounds.into_iter().next() {
        return first;
    }

    SoundSource::embedded("default")
}
