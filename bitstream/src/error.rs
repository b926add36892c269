//! Error types for bit packing and unpacking.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors raised by [`BitReader`](crate::BitReader) and [`BitWriter`](crate::BitWriter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// The payload ended before the requested bits.
    UnexpectedEof { requested: usize, available: usize },

    /// A multi-bit read or write asked for more than 64 bits.
    InvalidBitCount { bits: usize, max_bits: usize },

    /// A value has set bits above the requested width.
    ValueOutOfRange { value: u64, bits: usize },
}

impl BitError {
    /// Returns `true` if the payload simply ran out of bits.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => write!(
                f,
                "payload exhausted: needed {requested} bits, {available} left"
            ),
            Self::InvalidBitCount { bits, max_bits } => {
                write!(f, "bit count {bits} exceeds {max_bits}")
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value:#x} does not fit in {bits} bits")
            }
        }
    }
}

impl std::error::Error for BitError {}
