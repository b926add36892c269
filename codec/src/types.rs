//! Core types for the codec.

use std::fmt;

/// Which of the two multiplexed streams a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Audio,
    Video,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Audio => "audio",
            Self::Video => "video",
        };
        write!(f, "{name}")
    }
}

/// Mask selecting the 4-bit register shared by both sample domains.
pub(crate) const REGISTER_MASK: u8 = 0x0F;

/// A sample domain mapped onto the 4-bit register.
///
/// Audio samples are signed (two's complement, -8..=7), video pixels are
/// unsigned (0..=15). Both wrap modulo 16 on ±1 steps.
pub trait SampleDomain {
    /// The sample type callers see.
    type Sample: Copy + fmt::Debug + PartialEq;

    /// Which stream this domain encodes.
    const KIND: StreamKind;

    /// Returns the register value for `sample`, or `None` if it is outside the domain.
    fn to_register(sample: Self::Sample) -> Option<u8>;

    /// Returns the sample for a register value. Bits above the low four are ignored.
    fn from_register(register: u8) -> Self::Sample;

    /// Widens a sample for error reporting.
    fn widen(sample: Self::Sample) -> i64;
}

/// Signed 4-bit audio samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audio {}

/// Unsigned 4-bit grayscale pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Video {}

impl SampleDomain for Audio {
    type Sample = i8;

    const KIND: StreamKind = StreamKind::Audio;

    fn to_register(sample: i8) -> Option<u8> {
        (-8..=7)
            .contains(&sample)
            .then(|| sample.to_ne_bytes()[0] & REGISTER_MASK)
    }

    fn from_register(register: u8) -> i8 {
        // Move the nibble's sign bit to bit 7, then shift back arithmetically.
        i8::from_ne_bytes([register << 4]) >> 4
    }

    fn widen(sample: i8) -> i64 {
        i64::from(sample)
    }
}

impl SampleDomain for Video {
    type Sample = u8;

    const KIND: StreamKind = StreamKind::Video;

    fn to_register(sample: u8) -> Option<u8> {
        (sample <= REGISTER_MASK).then_some(sample)
    }

    fn from_register(register: u8) -> u8 {
        register & REGISTER_MASK
    }

    fn widen(sample: u8) -> i64 {
        i64::from(sample)
    }
}
