use container::{
    decode_container, encode_container, DecodeError, FrameGeometry, HeaderLayout, Limits, Marker,
};
use proptest::prelude::*;

fn geometry_strategy() -> impl Strategy<Value = Option<FrameGeometry>> {
    prop::option::of((any::<u8>(), any::<u8>()).prop_map(|(w, h)| FrameGeometry::new(w, h)))
}

proptest! {
    #[test]
    fn prop_container_roundtrip(
        geometry in geometry_strategy(),
        audio in prop::collection::vec(any::<u8>(), 0..256),
        video in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let bytes = encode_container(geometry, &audio, &video).unwrap();
        let layout = if geometry.is_some() { HeaderLayout::WithGeometry } else { HeaderLayout::Compact };
        prop_assert_eq!(bytes.len(), layout.header_size() + audio.len() + video.len());

        let container = decode_container(&bytes, layout, &Limits::for_testing()).unwrap();
        prop_assert_eq!(container.header.geometry, geometry);
        prop_assert_eq!(container.header.audio_len as usize, audio.len());
        prop_assert_eq!(container.header.video_len as usize, video.len());
        prop_assert_eq!(container.audio, &audio[..]);
        prop_assert_eq!(container.video, &video[..]);
    }

    #[test]
    fn prop_bad_start_marker_is_malformed(first in any::<u8>().prop_filter("not 'A'", |b| *b != b'A')) {
        let mut bytes = encode_container(None, &[], &[0x12, 0x34]).unwrap();
        bytes[0] = first;
        let err = decode_container(&bytes, HeaderLayout::Compact, &Limits::for_testing()).unwrap_err();
        prop_assert_eq!(err, DecodeError::MalformedHeader { marker: Marker::Start, found: first });
    }

    #[test]
    fn prop_truncation_is_detected(
        audio in prop::collection::vec(any::<u8>(), 1..64),
        cut in 1usize..64,
    ) {
        let bytes = encode_container(None, &audio, &[]).unwrap();
        let cut = cut.min(audio.len());
        let truncated = &bytes[..bytes.len() - cut];
        let err = decode_container(truncated, HeaderLayout::Compact, &Limits::for_testing()).unwrap_err();
        let is_truncated = matches!(err, DecodeError::TruncatedFile { .. });
        prop_assert!(is_truncated);
    }
}
