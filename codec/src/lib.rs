//! Quantization and 4-bit differential coding for the fpmedia codec.
//!
//! Audio is reduced to signed 4-bit mono samples and video to unsigned 4-bit
//! grayscale pixels. Each stream is coded as deltas against a running 4-bit
//! register using four variable-length symbols, then packed with
//! [`bitstream`] and multiplexed with [`container`].
//!
//! # Decoding needs a count
//!
//! The zero bits that pad a payload's last byte are valid `Repeat` symbols,
//! so a payload does not say where it ends. [`decode_audio`] and
//! [`decode_video`] take the expected sample or frame count; the
//! `*_to_end` variants and the streaming decoders infer the end and say how
//! exact that inference is.
//!
//! # Example
//!
//! ```
//! use codec::{decode_audio, encode_audio, CodecLimits};
//!
//! let samples = [0, 0, 1, 2, 1, -8];
//! let payload = encode_audio(&samples).unwrap();
//! assert_eq!(payload, [0xD4, 0x1E]);
//!
//! let decoded = decode_audio(&payload, samples.len(), &CodecLimits::default()).unwrap();
//! assert_eq!(decoded, samples);
//! ```

mod audio;
mod decoder;
mod error;
mod limits;
mod media;
mod quantize;
mod symbol;
mod types;
mod video;

pub use audio::{decode_audio, decode_audio_to_end, encode_audio, AudioDecoder};
pub use decoder::{transition, DecodeState, Step, SymbolDecoder};
pub use error::{CodecError, CodecResult, FormatReason, GeometryReason, LimitKind};
pub use limits::CodecLimits;
pub use media::{decode_media, encode_media, DecodeRequest, DecodedMedia};
pub use quantize::{
    dequantize_audio_sample, quantize_audio_frame, quantize_frame, quantize_pcm, quantize_pixel,
    PcmFormat, AUDIO_SAMPLE_RATE,
};
pub use symbol::{
    wrapping_decrement, wrapping_increment, Symbol, SymbolEncoder, LITERAL_BITS, MAX_SYMBOL_BITS,
};
pub use types::{Audio, SampleDomain, StreamKind, Video};
pub use video::{
    decode_video, decode_video_to_end, encode_video, VideoDecoder, VIDEO_FRAME_RATE,
};
pub use container::{FrameGeometry, HeaderLayout, Limits as ContainerLimits};
