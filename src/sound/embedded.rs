//! Embedded cue-sound data.
//!
//! Fallback audio compiled into the binary, used when no system sound can
//! be found or played. The payload is a short 16-bit PCM WAV click.

/// Embedded cue sound: 16 samples of a square-wave click.
///
/// WAV layout:
/// - RIFF header (12 bytes)
/// - fmt chunk (24 bytes)
/// - data chunk header (8 bytes)
/// - audio data (32 bytes, 16 mono samples)
pub const DEFAULT_CUE_DATA: &[u8] = &[
    // RIFF header
    0x52, 0x49, 0x46, 0x46, // "RIFF"
    0x44, 0x00, 0x00, 0x00, // File size - 8 (68 bytes)
    0x57, 0x41, 0x56, 0x45, // "WAVE"
    // fmt chunk
    0x66, 0x6D, 0x74, 0x20, // "fmt "
    0x10, 0x00, 0x00, 0x00, // Chunk size (16 bytes)
    0x01, 0x00, // Audio format (1 = PCM)
    0x01, 0x00, // Number of channels (1 = mono)
    0x44, 0xAC, 0x00, 0x00, // Sample rate (44100 Hz)
    0x88, 0x58, 0x01, 0x00, // Byte rate (44100 * 1 * 2 = 88200)
    0x02, 0x00, // Block align (1 * 2 = 2)
    0x10, 0x00, // Bits per sample (16)
    // data chunk header
    0x64, 0x61, 0x74, 0x61, // "data"
    0x20, 0x00, 0x00, 0x00, // Data size (32 bytes)
    // 8 samples at +8000, 8 samples at -8000
    0x40, 0x1F, 0x40, 0x1F, 0x40, 0x1F, 0x40, 0x1F, //
    0x40, 0x1F, 0x40, 0x1F, 0x40, 0x1F, 0x40, 0x1F, //
    0xC0, 0xE0, 0xC0, 0xE0, 0xC0, 0xE0, 0xC0, 0xE0, //
    0xC0, 0xE0, 0xC0, 0xE0, 0xC0, 0xE0, 0xC0, 0xE0, //
];

/// Returns the embedded cue-sound data.
#[must_use]
pub const fn get_embedded_cue() -> &'static [u8] {
    DEFAULT_CUE_DATA
}
