use codec::{
    decode_media, encode_media, CodecError, CodecLimits, ContainerLimits, DecodeRequest,
    DecodedMedia, FrameGeometry, GeometryReason, HeaderLayout, StreamKind,
};
use container::{decode_container, DecodeError, Marker};

fn frames() -> Vec<Vec<u8>> {
    vec![vec![1, 2, 3, 4, 5, 6, 7, 8], vec![1, 2, 3, 4, 5, 6, 7, 9]]
}

#[test]
fn header_lengths_match_payloads() {
    let geometry = FrameGeometry::new(4, 2);
    let bytes = encode_media(&[0, 1, 2], &frames(), geometry, HeaderLayout::WithGeometry).unwrap();
    let container =
        decode_container(&bytes, HeaderLayout::WithGeometry, &ContainerLimits::for_testing())
            .unwrap();
    assert_eq!(container.header.geometry, Some(geometry));
    assert_eq!(container.header.audio_len as usize, container.audio.len());
    assert_eq!(container.header.video_len as usize, container.video.len());
    assert_eq!(container.trailing_len, 0);
    assert_eq!(&bytes[..1], b"A");
    assert_eq!(bytes[11], b'Z');
}

#[test]
fn empty_audio_round_trips() {
    let geometry = FrameGeometry::new(4, 2);
    let bytes = encode_media(&[], &frames(), geometry, HeaderLayout::WithGeometry).unwrap();
    let request = DecodeRequest {
        audio_samples: Some(0),
        video_frames: Some(2),
        geometry: None,
    };
    let decoded = decode_media(
        &bytes,
        HeaderLayout::WithGeometry,
        &request,
        &ContainerLimits::for_testing(),
        &CodecLimits::for_testing(),
    )
    .unwrap();
    assert_eq!(decoded.header.audio_len, 0);
    assert!(decoded.audio.is_empty());
    assert_eq!(decoded.video, frames());
}

#[test]
fn bad_start_marker_is_malformed_header() {
    let mut bytes = encode_media(&[1], &frames(), FrameGeometry::new(4, 2), HeaderLayout::Compact)
        .unwrap();
    bytes[0] = b'B';
    let err = decode_media(
        &bytes,
        HeaderLayout::Compact,
        &DecodeRequest::default(),
        &ContainerLimits::for_testing(),
        &CodecLimits::for_testing(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        CodecError::Container(DecodeError::MalformedHeader {
            marker: Marker::Start,
            found: b'B'
        })
    );
}

#[test]
fn truncated_video_payload() {
    let bytes = encode_media(&[1], &frames(), FrameGeometry::new(4, 2), HeaderLayout::Compact)
        .unwrap();
    let err = decode_media(
        &bytes[..bytes.len() - 1],
        HeaderLayout::Compact,
        &DecodeRequest::default(),
        &ContainerLimits::for_testing(),
        &CodecLimits::for_testing(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Container(DecodeError::TruncatedFile { .. })
    ));
}

#[test]
fn trailing_flash_bytes_are_ignored() {
    let mut bytes = encode_media(&[2, 3], &[] as &[Vec<u8>], FrameGeometry::NONE, HeaderLayout::Compact)
        .unwrap();
    bytes.extend_from_slice(&[0xFF; 16]);
    let request = DecodeRequest {
        audio_samples: Some(2),
        ..DecodeRequest::default()
    };
    let decoded = decode_media(
        &bytes,
        HeaderLayout::Compact,
        &request,
        &ContainerLimits::for_testing(),
        &CodecLimits::for_testing(),
    )
    .unwrap();
    assert_eq!(decoded.audio, [2, 3]);
    assert!(decoded.video.is_empty());
    assert_eq!(decoded.geometry, None);
}

fn decode_with(
    bytes: &[u8],
    layout: HeaderLayout,
    request: &DecodeRequest,
) -> Result<DecodedMedia, CodecError> {
    decode_media(
        bytes,
        layout,
        request,
        &ContainerLimits::for_testing(),
        &CodecLimits::for_testing(),
    )
}

#[test]
fn requested_frames_from_empty_video_underrun() {
    let no_frames: [&[u8]; 0] = [];
    let geometry = FrameGeometry::new(4, 2);
    let bytes = encode_media(&[1, 2], &no_frames, geometry, HeaderLayout::Compact).unwrap();
    let request = DecodeRequest {
        audio_samples: Some(2),
        video_frames: Some(3),
        geometry: Some(geometry),
    };
    let err = decode_with(&bytes, HeaderLayout::Compact, &request).unwrap_err();
    assert_eq!(
        err,
        CodecError::Underrun {
            stream: StreamKind::Video,
            decoded: 0,
            expected: 24,
        }
    );

    // A 0x0 header geometry means no video and does not conflict.
    let bytes = encode_media(&[1, 2], &no_frames, geometry, HeaderLayout::WithGeometry).unwrap();
    let err = decode_with(&bytes, HeaderLayout::WithGeometry, &request).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Underrun {
            stream: StreamKind::Video,
            decoded: 0,
            ..
        }
    ));
}

#[test]
fn requested_frames_from_empty_video_need_geometry() {
    let no_frames: [&[u8]; 0] = [];
    let bytes =
        encode_media(&[1, 2], &no_frames, FrameGeometry::new(4, 2), HeaderLayout::Compact).unwrap();
    let request = DecodeRequest {
        video_frames: Some(1),
        ..DecodeRequest::default()
    };
    let err = decode_with(&bytes, HeaderLayout::Compact, &request).unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidGeometry {
            reason: GeometryReason::Missing,
            ..
        }
    ));
}

#[test]
fn zero_requested_frames_from_empty_video() {
    let no_frames: [&[u8]; 0] = [];
    let bytes =
        encode_media(&[1, 2], &no_frames, FrameGeometry::new(4, 2), HeaderLayout::Compact).unwrap();
    let request = DecodeRequest {
        audio_samples: Some(2),
        video_frames: Some(0),
        geometry: None,
    };
    let decoded = decode_with(&bytes, HeaderLayout::Compact, &request).unwrap();
    assert_eq!(decoded.audio, vec![1, 2]);
    assert!(decoded.video.is_empty());
    assert_eq!(decoded.geometry, None);
}

#[test]
fn supplied_geometry_must_match_header() {
    let bytes =
        encode_media(&[], &frames(), FrameGeometry::new(4, 2), HeaderLayout::WithGeometry).unwrap();
    let request = DecodeRequest {
        video_frames: Some(2),
        geometry: Some(FrameGeometry::new(2, 4)),
        ..DecodeRequest::default()
    };
    let err = decode_with(&bytes, HeaderLayout::WithGeometry, &request).unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidGeometry {
            geometry: FrameGeometry::new(2, 4),
            reason: GeometryReason::HeaderMismatch {
                header: FrameGeometry::new(4, 2),
            },
        }
    );

    let request = DecodeRequest {
        geometry: Some(FrameGeometry::new(4, 2)),
        ..request
    };
    let decoded = decode_with(&bytes, HeaderLayout::WithGeometry, &request).unwrap();
    assert_eq!(decoded.video, frames());
}
