//! Error types for codec operations.

use std::fmt;

use container::FrameGeometry;

use crate::types::StreamKind;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during quantization, encoding, or decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Container parse error.
    Container(container::DecodeError),

    /// Container assembly error.
    Encode(container::EncodeError),

    /// Bitstream error other than running out of bits.
    Bitstream(bitstream::BitError),

    /// Raw input the quantizer cannot reduce.
    UnsupportedInputFormat { reason: FormatReason },

    /// A sample lies outside its stream's domain.
    SampleOutOfRange {
        stream: StreamKind,
        index: usize,
        value: i64,
    },

    /// A video frame does not hold `width × height` pixels.
    FrameSizeMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    /// Frame geometry unusable for the requested operation.
    InvalidGeometry {
        geometry: FrameGeometry,
        reason: GeometryReason,
    },

    /// The payload ran out of bits before the expected sample count was reached.
    Underrun {
        stream: StreamKind,
        decoded: usize,
        expected: usize,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Why raw PCM input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReason {
    ZeroChannels,
    UnsupportedBitDepth { bits: u16 },
    UnsupportedSampleRate { rate: u32 },
    PartialFrame { len: usize, frame_bytes: usize },
}

/// Why a frame geometry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryReason {
    /// Video is present but a frame holds no pixels.
    Empty,
    /// Video is present but the geometry was neither in the header nor supplied.
    Missing,
    /// Too few pixels per frame for padding to be told apart from a frame.
    TooSmallToDelimit { pixels: usize },
    /// The supplied geometry disagrees with the one in the header.
    HeaderMismatch { header: FrameGeometry },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    AudioSamples,
    VideoFrames,
    FramePixels,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(e) => write!(f, "container error: {e}"),
            Self::Encode(e) => write!(f, "container encode error: {e}"),
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::UnsupportedInputFormat { reason } => {
                write!(f, "unsupported input format: {reason}")
            }
            Self::SampleOutOfRange {
                stream,
                index,
                value,
            } => {
                write!(f, "{stream} sample {index} out of range: {value}")
            }
            Self::FrameSizeMismatch {
                frame,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "frame {frame} has {actual} pixels, expected {expected}"
                )
            }
            Self::InvalidGeometry { geometry, reason } => {
                write!(
                    f,
                    "invalid frame geometry {}x{}: {reason}",
                    geometry.width, geometry.height
                )
            }
            Self::Underrun {
                stream,
                decoded,
                expected,
            } => {
                write!(
                    f,
                    "{stream} payload exhausted after {decoded} of {expected} samples"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroChannels => write!(f, "zero channels"),
            Self::UnsupportedBitDepth { bits } => {
                write!(f, "{bits}-bit samples (expected 8, 16, 24 or 32)")
            }
            Self::UnsupportedSampleRate { rate } => {
                write!(
                    f,
                    "{rate} Hz sample rate (expected {} Hz)",
                    crate::quantize::AUDIO_SAMPLE_RATE
                )
            }
            Self::PartialFrame { len, frame_bytes } => {
                write!(
                    f,
                    "{len} bytes is not a whole number of {frame_bytes}-byte frames"
                )
            }
        }
    }
}

impl fmt::Display for GeometryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "frames hold no pixels"),
            Self::Missing => write!(f, "geometry not in header and not supplied"),
            Self::TooSmallToDelimit { pixels } => {
                write!(
                    f,
                    "{pixels} pixels per frame needs an explicit frame count"
                )
            }
            Self::HeaderMismatch { header } => {
                write!(f, "header declares {}x{}", header.width, header.height)
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AudioSamples => "audio samples",
            Self::VideoFrames => "video frames",
            Self::FramePixels => "frame pixels",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Container(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Bitstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<container::DecodeError> for CodecError {
    fn from(err: container::DecodeError) -> Self {
        Self::Container(err)
    }
}

impl From<container::EncodeError> for CodecError {
    fn from(err: container::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<bitstream::BitError> for CodecError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}

impl CodecError {
    /// Maps a bit-level read failure to an underrun at the given position.
    pub(crate) fn underrun(
        err: bitstream::BitError,
        stream: StreamKind,
        decoded: usize,
        expected: usize,
    ) -> Self {
        if err.is_eof() {
            Self::Underrun {
                stream,
                decoded,
                expected,
            }
        } else {
            Self::Bitstream(err)
        }
    }
}
