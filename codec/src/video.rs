//! Video stream encoding and decoding.
//!
//! Every pixel position owns a register that starts at zero. Deltas are taken
//! along each pixel's time series, but symbols are emitted frame by frame so a
//! player can decode frames in order.

use bitstream::BitWriter;
use container::FrameGeometry;

use crate::decoder::SymbolDecoder;
use crate::error::{CodecError, CodecResult, GeometryReason, LimitKind};
use crate::limits::CodecLimits;
use crate::symbol::{encode_into, MAX_SYMBOL_BITS};
use crate::types::{SampleDomain, StreamKind, Video};

/// Playback rate the player assumes for video frames.
pub const VIDEO_FRAME_RATE: u32 = 24;

/// Smallest frame for which byte padding cannot be mistaken for a frame.
const MIN_DELIMITED_PIXELS: usize = 8;

/// Encodes frames of 0..=15 pixels into a packed payload.
///
/// Every frame must hold exactly `geometry.pixel_count()` pixels. No frames
/// produce an empty payload.
pub fn encode_video<F: AsRef<[u8]>>(frames: &[F], geometry: FrameGeometry) -> CodecResult<Vec<u8>> {
    if frames.is_empty() {
        return Ok(Vec::new());
    }
    let pixels = geometry.pixel_count();
    if pixels == 0 {
        return Err(CodecError::InvalidGeometry {
            geometry,
            reason: GeometryReason::Empty,
        });
    }

    let total = frames.len().saturating_mul(pixels);
    let mut writer = BitWriter::with_capacity_bits(total.saturating_mul(MAX_SYMBOL_BITS));
    let mut registers = vec![0u8; pixels];
    for (frame_index, frame) in frames.iter().enumerate() {
        let frame = frame.as_ref();
        if frame.len() != pixels {
            return Err(CodecError::FrameSizeMismatch {
                frame: frame_index,
                expected: pixels,
                actual: frame.len(),
            });
        }
        for (position, (&pixel, previous)) in frame.iter().zip(registers.iter_mut()).enumerate() {
            let register = Video::to_register(pixel).ok_or(CodecError::SampleOutOfRange {
                stream: StreamKind::Video,
                index: frame_index * pixels + position,
                value: Video::widen(pixel),
            })?;
            encode_into(&mut writer, previous, register);
        }
    }
    Ok(writer.finish())
}

/// Decodes exactly `frame_count` frames from `payload`.
pub fn decode_video(
    payload: &[u8],
    geometry: FrameGeometry,
    frame_count: usize,
    limits: &CodecLimits,
) -> CodecResult<Vec<Vec<u8>>> {
    if frame_count > limits.max_video_frames {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::VideoFrames,
            limit: limits.max_video_frames,
            actual: frame_count,
        });
    }
    if frame_count == 0 {
        return Ok(Vec::new());
    }

    let mut decoder = VideoDecoder::new(payload, geometry, limits)?;
    let pixels = geometry.pixel_count();
    let expected = frame_count.saturating_mul(pixels);
    let mut frames = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        let mut frame = vec![0u8; pixels];
        decoder.read_frame(&mut frame).map_err(|err| match err {
            CodecError::Underrun {
                stream, decoded, ..
            } => CodecError::Underrun {
                stream,
                decoded,
                expected,
            },
            other => other,
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Decodes frames until only byte padding remains.
///
/// Requires at least eight pixels per frame.
pub fn decode_video_to_end(
    payload: &[u8],
    geometry: FrameGeometry,
    limits: &CodecLimits,
) -> CodecResult<Vec<Vec<u8>>> {
    let mut decoder = VideoDecoder::new(payload, geometry, limits)?;
    let mut frames = Vec::new();
    while let Some(frame) = decoder.next_frame()? {
        frames.push(frame);
        if frames.len() > limits.max_video_frames {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::VideoFrames,
                limit: limits.max_video_frames,
                actual: frames.len(),
            });
        }
    }
    Ok(frames)
}

/// Frame-at-a-time video decoder for playback loops.
///
/// Holds one register per pixel position; the position index resets at every
/// frame boundary.
#[derive(Debug, Clone)]
pub struct VideoDecoder<'a> {
    symbols: SymbolDecoder<'a>,
    geometry: FrameGeometry,
    registers: Vec<u8>,
    frames_decoded: usize,
}

impl<'a> VideoDecoder<'a> {
    /// Creates a decoder for frames of `geometry`.
    pub fn new(payload: &'a [u8], geometry: FrameGeometry, limits: &CodecLimits) -> CodecResult<Self> {
        let pixels = geometry.pixel_count();
        if pixels == 0 {
            return Err(CodecError::InvalidGeometry {
                geometry,
                reason: GeometryReason::Empty,
            });
        }
        if pixels > limits.max_frame_pixels {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::FramePixels,
                limit: limits.max_frame_pixels,
                actual: pixels,
            });
        }
        Ok(Self {
            symbols: SymbolDecoder::new(payload),
            geometry,
            registers: vec![0; pixels],
            frames_decoded: 0,
        })
    }

    #[must_use]
    pub const fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Returns how many frames have been decoded.
    #[must_use]
    pub const fn frames_decoded(&self) -> usize {
        self.frames_decoded
    }

    /// Decodes exactly one frame into `out`.
    ///
    /// Fails with [`CodecError::Underrun`] if the payload ends inside the frame.
    pub fn read_frame(&mut self, out: &mut [u8]) -> CodecResult<()> {
        let pixels = self.registers.len();
        if out.len() != pixels {
            return Err(CodecError::FrameSizeMismatch {
                frame: self.frames_decoded,
                expected: pixels,
                actual: out.len(),
            });
        }
        let start = self.frames_decoded * pixels;
        for (position, (register, slot)) in self.registers.iter_mut().zip(out.iter_mut()).enumerate() {
            *register = self.symbols.next_register(*register).map_err(|err| {
                CodecError::underrun(err, StreamKind::Video, start + position, start + pixels)
            })?;
            *slot = Video::from_register(*register);
        }
        self.frames_decoded += 1;
        Ok(())
    }

    /// Decodes the next frame into `out`, returning `false` at end of stream.
    ///
    /// The end is recognised when fewer than eight bits remain and all of them
    /// are zero. Geometries under eight pixels are rejected because a frame of
    /// repeats would look the same as padding.
    pub fn decode_frame(&mut self, out: &mut [u8]) -> CodecResult<bool> {
        let pixels = self.registers.len();
        if pixels < MIN_DELIMITED_PIXELS {
            return Err(CodecError::InvalidGeometry {
                geometry: self.geometry,
                reason: GeometryReason::TooSmallToDelimit { pixels },
            });
        }
        if self.symbols.at_padding() {
            return Ok(false);
        }
        self.read_frame(out)?;
        Ok(true)
    }

    /// Decodes the next frame into a new buffer.
    pub fn next_frame(&mut self) -> CodecResult<Option<Vec<u8>>> {
        let mut frame = vec![0u8; self.registers.len()];
        Ok(self.decode_frame(&mut frame)?.then_some(frame))
    }
}
