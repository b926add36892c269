//! Audio stream encoding and decoding.

use bitstream::BitResult;

use crate::decoder::SymbolDecoder;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::symbol::SymbolEncoder;
use crate::types::{Audio, SampleDomain, StreamKind};

/// Encodes audio samples in -8..=7 into a packed payload.
///
/// An empty input produces an empty payload.
pub fn encode_audio(samples: &[i8]) -> CodecResult<Vec<u8>> {
    let mut encoder = SymbolEncoder::with_capacity(samples.len());
    for (index, &sample) in samples.iter().enumerate() {
        let register = Audio::to_register(sample).ok_or(CodecError::SampleOutOfRange {
            stream: StreamKind::Audio,
            index,
            value: Audio::widen(sample),
        })?;
        encoder.push(register);
    }
    Ok(encoder.finish())
}

/// Decodes exactly `expected_samples` samples from `payload`.
///
/// Bits after the last expected sample are ignored.
pub fn decode_audio(
    payload: &[u8],
    expected_samples: usize,
    limits: &CodecLimits,
) -> CodecResult<Vec<i8>> {
    check_sample_limit(expected_samples, limits)?;
    let mut decoder = AudioDecoder::new(payload);
    let mut samples = Vec::with_capacity(expected_samples);
    for decoded in 0..expected_samples {
        let sample = decoder.next_sample().map_err(|err| {
            CodecError::underrun(err, StreamKind::Audio, decoded, expected_samples)
        })?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Decodes samples until the payload runs out of bits.
///
/// The stream does not delimit itself: zero padding in the last byte decodes
/// as up to seven extra repeats of the final sample. Prefer
/// [`decode_audio`] whenever the sample count is known.
pub fn decode_audio_to_end(payload: &[u8], limits: &CodecLimits) -> CodecResult<Vec<i8>> {
    let mut decoder = AudioDecoder::new(payload);
    let mut samples = Vec::new();
    while !decoder.is_exhausted() {
        let decoded = samples.len();
        check_sample_limit(decoded + 1, limits)?;
        let sample = decoder
            .next_sample()
            .map_err(|err| CodecError::underrun(err, StreamKind::Audio, decoded, decoded + 1))?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Sample-at-a-time audio decoder for playback loops.
#[derive(Debug, Clone)]
pub struct AudioDecoder<'a> {
    symbols: SymbolDecoder<'a>,
    previous: u8,
    decoded: usize,
}

impl<'a> AudioDecoder<'a> {
    #[must_use]
    pub const fn new(payload: &'a [u8]) -> Self {
        Self {
            symbols: SymbolDecoder::new(payload),
            previous: 0,
            decoded: 0,
        }
    }

    /// Decodes the next sample.
    pub fn next_sample(&mut self) -> BitResult<i8> {
        self.previous = self.symbols.next_register(self.previous)?;
        self.decoded += 1;
        Ok(Audio::from_register(self.previous))
    }

    /// Returns how many samples have been decoded.
    #[must_use]
    pub const fn samples_decoded(&self) -> usize {
        self.decoded
    }

    /// Returns `true` once every bit of the payload has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.symbols.bits_remaining() == 0
    }
}

fn check_sample_limit(samples: usize, limits: &CodecLimits) -> CodecResult<()> {
    if samples > limits.max_audio_samples {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::AudioSamples,
            limit: limits.max_audio_samples,
            actual: samples,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_audio_is_empty_payload() {
        assert!(encode_audio(&[]).unwrap().is_empty());
        assert!(decode_audio(&[], 0, &CodecLimits::for_testing())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn out_of_range_sample_is_rejected() {
        let err = encode_audio(&[0, 1, 8]).unwrap_err();
        assert_eq!(
            err,
            CodecError::SampleOutOfRange {
                stream: StreamKind::Audio,
                index: 2,
                value: 8
            }
        );
        assert!(encode_audio(&[-9]).is_err());
    }

    #[test]
    fn wraparound_uses_short_symbols() {
        // 0 -> 7 literal (7 bits), 7 -> -8 increment (2), -8 -> 7 decrement (3).
        let payload = encode_audio(&[7, -8, 7]).unwrap();
        assert_eq!(payload.len(), 2);
        let decoded = decode_audio(&payload, 3, &CodecLimits::for_testing()).unwrap();
        assert_eq!(decoded, vec![7, -8, 7]);
    }

    #[test]
    fn underrun_reports_progress() {
        let payload = encode_audio(&[1, 2, 3]).unwrap();
        // Six symbol bits plus two padding repeats, then the byte runs out.
        let err = decode_audio(&payload, 10, &CodecLimits::for_testing()).unwrap_err();
        assert_eq!(
            err,
            CodecError::Underrun {
                stream: StreamKind::Audio,
                decoded: 5,
                expected: 10
            }
        );
    }

    #[test]
    fn expected_count_over_limit_is_rejected() {
        let limits = CodecLimits::for_testing();
        let err = decode_audio(&[], limits.max_audio_samples + 1, &limits).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::AudioSamples,
                ..
            }
        ));
    }

    #[test]
    fn to_end_includes_padding_repeats() {
        let payload = encode_audio(&[1, 2, 3]).unwrap();
        let decoded = decode_audio_to_end(&payload, &CodecLimits::for_testing()).unwrap();
        assert_eq!(decoded, vec![1, 2, 3, 3, 3]);
    }

    #[test]
    fn streaming_decoder_counts_samples() {
        let payload = encode_audio(&[-1, -2]).unwrap();
        let mut decoder = AudioDecoder::new(&payload);
        assert_eq!(decoder.next_sample().unwrap(), -1);
        assert_eq!(decoder.next_sample().unwrap(), -2);
        assert_eq!(decoder.samples_decoded(), 2);
    }
}
