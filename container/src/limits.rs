//! Configurable limits for bounded decoding.

/// Container-level limits for decoding.
///
/// These limits are checked against the declared header lengths before any
/// payload is sliced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes, header and trailing bytes included.
    pub max_file_bytes: usize,

    /// Maximum declared audio payload length in bytes.
    pub max_audio_bytes: usize,

    /// Maximum declared video payload length in bytes.
    pub max_video_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Enough for tens of minutes at 44.1 kHz and 32x24@24.
            max_file_bytes: 256 * 1024 * 1024,
            max_audio_bytes: 128 * 1024 * 1024,
            max_video_bytes: 128 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_file_bytes: 4096,
            max_audio_bytes: 2048,
            max_video_bytes: 2048,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_file_bytes: usize::MAX,
            max_audio_bytes: usize::MAX,
            max_video_bytes: usize::MAX,
        }
    }
}
