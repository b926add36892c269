#![no_main]

use codec::{decode_media, CodecLimits, DecodeRequest, FrameGeometry, HeaderLayout};
use container::Limits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bytes)) = data.split_first() else {
        return;
    };
    let layout = if selector & 1 == 0 {
        HeaderLayout::Compact
    } else {
        HeaderLayout::WithGeometry
    };
    let request = DecodeRequest {
        audio_samples: (selector & 2 != 0).then_some(usize::from(selector) * 4),
        video_frames: (selector & 4 != 0).then_some(usize::from(selector >> 3)),
        geometry: (selector & 8 != 0).then_some(FrameGeometry::new(4, 3)),
    };

    if let Ok(decoded) = decode_media(
        bytes,
        layout,
        &request,
        &Limits::for_testing(),
        &CodecLimits::for_testing(),
    ) {
        if let Some(expected) = request.audio_samples {
            assert_eq!(decoded.audio.len(), expected);
        }
        if let Some(frames) = request.video_frames {
            assert_eq!(decoded.video.len(), frames);
        }
        assert!(decoded.audio.iter().all(|s| (-8..=7).contains(s)));
        assert!(decoded.video.iter().flatten().all(|&p| p <= 15));
    }
});
