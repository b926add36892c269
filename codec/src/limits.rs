//! Limits for codec-level decoding.

/// Codec-specific limits enforced before decoding allocates.
///
/// Expected sample and frame counts come from the caller, not the payload, so
/// they are bounded here before any buffer is sized from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of audio samples decoded from one payload.
    pub max_audio_samples: usize,
    /// Maximum number of video frames decoded from one payload.
    pub max_video_frames: usize,
    /// Maximum number of pixels per frame.
    pub max_frame_pixels: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            // One hour at 44.1 kHz.
            max_audio_samples: 44_100 * 60 * 60,
            // One hour at 24 fps.
            max_video_frames: 24 * 60 * 60,
            max_frame_pixels: 255 * 255,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_audio_samples: 4096,
            max_video_frames: 64,
            max_frame_pixels: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_audio_samples: usize::MAX,
            max_video_frames: usize::MAX,
            max_frame_pixels: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = CodecLimits::default();
        assert!(limits.max_audio_samples >= 44_100);
        assert!(limits.max_video_frames >= 24);
        assert_eq!(limits.max_frame_pixels, 65_025);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();
        assert!(test_limits.max_audio_samples < default_limits.max_audio_samples);
        assert!(test_limits.max_video_frames < default_limits.max_video_frames);
        assert!(test_limits.max_frame_pixels < default_limits.max_frame_pixels);
    }

    #[test]
    fn unlimited_limits() {
        let limits = CodecLimits::unlimited();
        assert_eq!(limits.max_audio_samples, usize::MAX);
        assert_eq!(limits.max_frame_pixels, usize::MAX);
    }
}
