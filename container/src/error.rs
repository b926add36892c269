//! Error types for container operations.

use std::fmt;

/// Result type for container decoding.
pub type ContainerResult<T> = Result<T, DecodeError>;

/// Errors that can occur while parsing a container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A header marker byte did not match.
    MalformedHeader { marker: Marker, found: u8 },

    /// The input ends before the header or a declared payload does.
    TruncatedFile { needed: usize, available: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// The two header marker positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

/// Specific container limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FileBytes,
    AudioPayloadBytes,
    VideoPayloadBytes,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall { needed: usize, available: usize },
    LengthOverflow { length: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader { marker, found } => {
                write!(
                    f,
                    "malformed header: {marker} marker is 0x{found:02X}, expected 0x{:02X}",
                    marker.expected()
                )
            }
            Self::TruncatedFile { needed, available } => {
                write!(
                    f,
                    "truncated file: need {needed} bytes, only {available} available"
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

impl Marker {
    /// Returns the byte this marker must hold.
    #[must_use]
    pub const fn expected(self) -> u8 {
        match self {
            Self::Start => crate::header::MARKER_START,
            Self::End => crate::header::MARKER_END,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::End => "end",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileBytes => "file bytes",
            Self::AudioPayloadBytes => "audio payload bytes",
            Self::VideoPayloadBytes => "video payload bytes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::LengthOverflow { length } => {
                write!(f, "payload length {length} does not fit in 32 bits")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}
