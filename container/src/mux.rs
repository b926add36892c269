//! Container multiplexing and demultiplexing.

use crate::error::{ContainerResult, DecodeError, EncodeError, LimitKind, Marker};
use crate::header::{ContainerHeader, FrameGeometry, HeaderLayout, MARKER_END, MARKER_START};
use crate::limits::Limits;

/// A decoded container whose payloads borrow from the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container<'a> {
    pub header: ContainerHeader,
    pub audio: &'a [u8],
    pub video: &'a [u8],
    /// Bytes present after the video payload. They are not part of the media.
    pub trailing_len: usize,
}

/// Decodes only the header, checking markers and header length.
pub fn decode_header(buf: &[u8], layout: HeaderLayout) -> ContainerResult<ContainerHeader> {
    let Some(&start) = buf.first() else {
        return Err(DecodeError::TruncatedFile {
            needed: layout.header_size(),
            available: 0,
        });
    };
    if start != MARKER_START {
        return Err(DecodeError::MalformedHeader {
            marker: Marker::Start,
            found: start,
        });
    }
    let header_size = layout.header_size();
    if buf.len() < header_size {
        return Err(DecodeError::TruncatedFile {
            needed: header_size,
            available: buf.len(),
        });
    }

    let (geometry, lengths_at) = match layout {
        HeaderLayout::Compact => (None, 1),
        HeaderLayout::WithGeometry => (Some(FrameGeometry::new(buf[1], buf[2])), 3),
    };
    let audio_len = read_u32_le(buf, lengths_at);
    let video_len = read_u32_le(buf, lengths_at + 4);

    let end = buf[header_size - 1];
    if end != MARKER_END {
        return Err(DecodeError::MalformedHeader {
            marker: Marker::End,
            found: end,
        });
    }

    Ok(ContainerHeader {
        geometry,
        audio_len,
        video_len,
    })
}

/// Decodes a container into its header and payload slices.
pub fn decode_container<'a>(
    buf: &'a [u8],
    layout: HeaderLayout,
    limits: &Limits,
) -> ContainerResult<Container<'a>> {
    if buf.len() > limits.max_file_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::FileBytes,
            limit: limits.max_file_bytes,
            actual: buf.len(),
        });
    }

    let header = decode_header(buf, layout)?;
    let audio_len = header.audio_len as usize;
    let video_len = header.video_len as usize;

    if audio_len > limits.max_audio_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::AudioPayloadBytes,
            limit: limits.max_audio_bytes,
            actual: audio_len,
        });
    }
    if video_len > limits.max_video_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::VideoPayloadBytes,
            limit: limits.max_video_bytes,
            actual: video_len,
        });
    }

    let audio_start = layout.header_size();
    let video_start = audio_start.saturating_add(audio_len);
    let video_end = video_start.saturating_add(video_len);
    if video_end > buf.len() {
        return Err(DecodeError::TruncatedFile {
            needed: video_end,
            available: buf.len(),
        });
    }

    Ok(Container {
        header,
        audio: &buf[audio_start..video_start],
        video: &buf[video_start..video_end],
        trailing_len: buf.len() - video_end,
    })
}

/// Encodes a container header into the provided output buffer.
pub fn encode_header(header: &ContainerHeader, out: &mut [u8]) -> Result<usize, EncodeError> {
    let header_size = header.layout().header_size();
    if out.len() < header_size {
        return Err(EncodeError::BufferTooSmall {
            needed: header_size,
            available: out.len(),
        });
    }

    out[0] = MARKER_START;
    let mut offset = 1;
    if let Some(geometry) = header.geometry {
        out[1] = geometry.width;
        out[2] = geometry.height;
        offset = 3;
    }
    out[offset..offset + 4].copy_from_slice(&header.audio_len.to_le_bytes());
    out[offset + 4..offset + 8].copy_from_slice(&header.video_len.to_le_bytes());
    out[offset + 8] = MARKER_END;

    Ok(header_size)
}

/// Multiplexes two payloads into container bytes.
///
/// `geometry` selects the layout: `Some` writes [`HeaderLayout::WithGeometry`],
/// `None` writes [`HeaderLayout::Compact`].
pub fn encode_container(
    geometry: Option<FrameGeometry>,
    audio: &[u8],
    video: &[u8],
) -> Result<Vec<u8>, EncodeError> {
    let audio_len = payload_len_u32(audio)?;
    let video_len = payload_len_u32(video)?;
    let header = ContainerHeader {
        geometry,
        audio_len,
        video_len,
    };

    let header_size = header.layout().header_size();
    let mut out = vec![0u8; header_size];
    encode_header(&header, &mut out)?;
    out.reserve_exact(audio.len() + video.len());
    out.extend_from_slice(audio);
    out.extend_from_slice(video);
    Ok(out)
}

fn payload_len_u32(payload: &[u8]) -> Result<u32, EncodeError> {
    u32::try_from(payload.len()).map_err(|_| EncodeError::LengthOverflow {
        length: payload.len(),
    })
}

fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
