//! Whole-file encoding and decoding of an audio stream and a video stream.

use std::{panic, thread};

use container::{
    decode_container, encode_container, ContainerHeader, FrameGeometry, HeaderLayout, Limits,
};

use crate::audio::{decode_audio, decode_audio_to_end, encode_audio};
use crate::error::{CodecError, CodecResult, GeometryReason};
use crate::limits::CodecLimits;
use crate::video::{decode_video, decode_video_to_end, encode_video};

/// Encodes both streams and multiplexes them into one container.
///
/// The two payloads are encoded on separate scoped threads. With
/// [`HeaderLayout::WithGeometry`] the geometry is written as `0x0` when there
/// are no frames.
pub fn encode_media<F>(
    audio: &[i8],
    frames: &[F],
    geometry: FrameGeometry,
    layout: HeaderLayout,
) -> CodecResult<Vec<u8>>
where
    F: AsRef<[u8]> + Sync,
{
    let (audio_payload, video_payload) = join_both(
        || encode_audio(audio),
        || encode_video(frames, geometry),
    );
    let audio_payload = audio_payload?;
    let video_payload = video_payload?;

    let header_geometry = match layout {
        HeaderLayout::Compact => None,
        HeaderLayout::WithGeometry if frames.is_empty() => Some(FrameGeometry::NONE),
        HeaderLayout::WithGeometry => Some(geometry),
    };
    Ok(encode_container(
        header_geometry,
        &audio_payload,
        &video_payload,
    )?)
}

/// How much of each stream to decode.
///
/// A `None` count decodes until the payload runs out, which is exact for
/// video frames of at least eight pixels and may add up to seven trailing
/// repeats to audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeRequest {
    pub audio_samples: Option<usize>,
    pub video_frames: Option<usize>,
    /// Frame geometry for containers whose header does not carry one.
    ///
    /// If the header does carry one, the two must agree.
    pub geometry: Option<FrameGeometry>,
}

/// Both streams of a decoded container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    pub header: ContainerHeader,
    /// Geometry the video was decoded with, if there was video.
    pub geometry: Option<FrameGeometry>,
    pub audio: Vec<i8>,
    pub video: Vec<Vec<u8>>,
}

/// Parses a container and decodes both payloads on separate scoped threads.
pub fn decode_media(
    bytes: &[u8],
    layout: HeaderLayout,
    request: &DecodeRequest,
    container_limits: &Limits,
    codec_limits: &CodecLimits,
) -> CodecResult<DecodedMedia> {
    let container = decode_container(bytes, layout, container_limits)?;
    let frames_requested = request.video_frames.is_some_and(|frames| frames > 0);
    let geometry = if container.video.is_empty() && !frames_requested {
        None
    } else {
        Some(resolve_geometry(request.geometry, container.header.geometry)?)
    };

    let (audio, video) = join_both(
        || match request.audio_samples {
            Some(expected) => decode_audio(container.audio, expected, codec_limits),
            None => decode_audio_to_end(container.audio, codec_limits),
        },
        || match (geometry, request.video_frames) {
            (None, _) => Ok(Vec::new()),
            (Some(geometry), Some(frames)) => {
                decode_video(container.video, geometry, frames, codec_limits)
            }
            (Some(geometry), None) => decode_video_to_end(container.video, geometry, codec_limits),
        },
    );

    Ok(DecodedMedia {
        header: container.header,
        geometry,
        audio: audio?,
        video: video?,
    })
}

/// Picks the frame geometry from the header or the request, which must agree.
///
/// A `0x0` header geometry means the file was written without video and counts
/// as absent.
fn resolve_geometry(
    requested: Option<FrameGeometry>,
    header: Option<FrameGeometry>,
) -> CodecResult<FrameGeometry> {
    match (requested, header.filter(|geometry| !geometry.is_empty())) {
        (Some(requested), Some(header)) if requested != header => {
            Err(CodecError::InvalidGeometry {
                geometry: requested,
                reason: GeometryReason::HeaderMismatch { header },
            })
        }
        (_, Some(geometry)) | (Some(geometry), None) => Ok(geometry),
        (None, None) => Err(CodecError::InvalidGeometry {
            geometry: FrameGeometry::NONE,
            reason: GeometryReason::Missing,
        }),
    }
}

fn join_both<A, B, RA, RB>(audio: A, video: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    thread::scope(|scope| {
        let video = scope.spawn(video);
        let audio = audio();
        let video = video.join().unwrap_or_else(|payload| panic::resume_unwind(payload));
        (audio, video)
    })
}
