//! Reduction of raw PCM and grayscale input to the 4-bit sample domains.
//!
//! Audio frames are averaged to mono and scaled down to signed 4 bits; pixels
//! are scaled down to unsigned 4 bits. Every rounding step rounds half away
//! from zero.

use crate::error::{CodecError, CodecResult, FormatReason};
use crate::types::StreamKind;

/// The only sample rate the playback hardware runs at.
pub const AUDIO_SAMPLE_RATE: u32 = 44_100;

/// Layout of interleaved little-endian PCM input.
///
/// 8-bit PCM is unsigned; 16-, 24- and 32-bit PCM is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Creates a new format description.
    #[must_use]
    pub const fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Returns the size of one channel sample in bytes.
    #[must_use]
    pub const fn bytes_per_sample(&self) -> usize {
        self.bits_per_sample as usize / 8
    }

    /// Returns the size of one interleaved frame in bytes.
    #[must_use]
    pub const fn frame_bytes(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Checks that the quantizer can reduce this format.
    pub fn validate(&self) -> CodecResult<()> {
        if self.sample_rate != AUDIO_SAMPLE_RATE {
            return Err(unsupported(FormatReason::UnsupportedSampleRate {
                rate: self.sample_rate,
            }));
        }
        validate_layout(self.channels, self.bits_per_sample)
    }
}

/// Quantizes interleaved little-endian PCM bytes to one audio sample per frame.
///
/// Empty input yields an empty sample vector.
pub fn quantize_pcm(bytes: &[u8], format: &PcmFormat) -> CodecResult<Vec<i8>> {
    format.validate()?;
    let frame_bytes = format.frame_bytes();
    if bytes.len() % frame_bytes != 0 {
        return Err(unsupported(FormatReason::PartialFrame {
            len: bytes.len(),
            frame_bytes,
        }));
    }

    let width = format.bytes_per_sample();
    bytes
        .chunks_exact(frame_bytes)
        .enumerate()
        .map(|(index, frame)| {
            let sum = frame
                .chunks_exact(width)
                .map(|raw| i64::from(read_le_sample(raw)))
                .sum();
            reduce_to_sample(sum, format.channels, format.bits_per_sample, index)
        })
        .collect()
}

/// Quantizes one frame of already-decoded channel values.
///
/// Values are interpreted at `bits_per_sample` depth: unsigned for 8 bits,
/// signed otherwise. Values beyond that depth are rejected with
/// [`CodecError::SampleOutOfRange`] when they scale outside the audio domain.
pub fn quantize_audio_frame(channel_values: &[i32], bits_per_sample: u16) -> CodecResult<i8> {
    let channels = u16::try_from(channel_values.len()).map_err(|_| {
        unsupported(FormatReason::PartialFrame {
            len: channel_values.len(),
            frame_bytes: usize::from(u16::MAX),
        })
    })?;
    validate_layout(channels, bits_per_sample)?;
    let sum = channel_values.iter().copied().map(i64::from).sum();
    reduce_to_sample(sum, channels, bits_per_sample, 0)
}

/// Quantizes one 8-bit grayscale pixel to 0..=15.
#[must_use]
pub fn quantize_pixel(pixel: u8) -> u8 {
    // 248..=255 round to 16, which the register cannot hold.
    let rounded = ((u16::from(pixel) + 8) / 16).min(15);
    u8::try_from(rounded).unwrap_or(15)
}

/// Quantizes a whole grayscale frame.
#[must_use]
pub fn quantize_frame(pixels: &[u8]) -> Vec<u8> {
    pixels.iter().copied().map(quantize_pixel).collect()
}

/// Expands a 4-bit audio sample back to unsigned 8-bit PCM.
#[must_use]
pub fn dequantize_audio_sample(sample: i8) -> u8 {
    // -8..=7 maps to 0..=240 in steps of 16.
    let centered = i16::from(sample.clamp(-8, 7)) * 16 + 128;
    u8::try_from(centered).unwrap_or(u8::MAX)
}

fn validate_layout(channels: u16, bits_per_sample: u16) -> CodecResult<()> {
    if channels == 0 {
        return Err(unsupported(FormatReason::ZeroChannels));
    }
    if !matches!(bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(unsupported(FormatReason::UnsupportedBitDepth {
            bits: bits_per_sample,
        }));
    }
    Ok(())
}

fn reduce_to_sample(sum: i64, channels: u16, bits_per_sample: u16, index: usize) -> CodecResult<i8> {
    let mut mono = div_round_half_away(sum, i64::from(channels));
    if bits_per_sample == 8 {
        mono -= 128;
    }
    let scaled = div_round_half_away(mono, 1i64 << (bits_per_sample - 4));
    // Rounding can reach +8, which signed 4 bits cannot hold.
    let clipped = if scaled == 8 { 7 } else { scaled };
    match i8::try_from(clipped) {
        Ok(sample) if sample >= -8 => Ok(sample),
        _ => Err(CodecError::SampleOutOfRange {
            stream: StreamKind::Audio,
            index,
            value: clipped,
        }),
    }
}

fn read_le_sample(raw: &[u8]) -> i32 {
    match *raw {
        [b0] => i32::from(b0),
        [b0, b1] => i32::from(i16::from_le_bytes([b0, b1])),
        // Place the 24 bits high, then shift back to sign-extend.
        [b0, b1, b2] => i32::from_le_bytes([0, b0, b1, b2]) >> 8,
        [b0, b1, b2, b3] => i32::from_le_bytes([b0, b1, b2, b3]),
        _ => 0,
    }
}

fn div_round_half_away(numerator: i64, denominator: i64) -> i64 {
    let half_up = (2 * numerator.abs() + denominator) / (2 * denominator);
    if numerator < 0 {
        -half_up
    } else {
        half_up
    }
}

const fn unsupported(reason: FormatReason) -> CodecError {
    CodecError::UnsupportedInputFormat { reason }
}
