//! Size statistics and container inspection reports.

use std::fmt::Write as _;

use codec::{
    decode_audio_to_end, decode_video_to_end, CodecError, CodecLimits, ContainerLimits,
    FrameGeometry, HeaderLayout, AUDIO_SAMPLE_RATE, VIDEO_FRAME_RATE,
};
use container::decode_container;
use serde::Serialize;

/// Bytes a grayscale source pixel is counted as before reduction (RGB).
const SOURCE_BYTES_PER_PIXEL: u64 = 3;

/// Sizes of one stream at each stage of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    /// Source size before quantization.
    pub uncompressed_bytes: u64,
    /// Size at 4 bits per sample, before delta coding.
    pub reduced_bytes: u64,
    /// Packed payload size.
    pub encoded_bytes: u64,
}

impl StreamStats {
    pub fn audio(samples: usize, source_bytes: u64, encoded_bytes: usize) -> Self {
        Self {
            uncompressed_bytes: source_bytes,
            reduced_bytes: (samples as u64).div_ceil(2),
            encoded_bytes: encoded_bytes as u64,
        }
    }

    pub fn video(frames: usize, geometry: FrameGeometry, encoded_bytes: usize) -> Self {
        let pixels = frames as u64 * geometry.pixel_count() as u64;
        Self {
            uncompressed_bytes: pixels * SOURCE_BYTES_PER_PIXEL,
            reduced_bytes: pixels.div_ceil(2),
            encoded_bytes: encoded_bytes as u64,
        }
    }

    /// Encoded size as a percentage of the reduced size.
    #[allow(clippy::cast_precision_loss)]
    pub fn encoded_percent(&self) -> Option<f64> {
        (self.reduced_bytes > 0)
            .then(|| self.encoded_bytes as f64 / self.reduced_bytes as f64 * 100.0)
    }

    fn add(self, other: Self) -> Self {
        Self {
            uncompressed_bytes: self.uncompressed_bytes + other.uncompressed_bytes,
            reduced_bytes: self.reduced_bytes + other.reduced_bytes,
            encoded_bytes: self.encoded_bytes + other.encoded_bytes,
        }
    }
}

/// Per-stream and combined size statistics for one encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    pub audio: Option<StreamStats>,
    pub video: Option<StreamStats>,
    pub total: StreamStats,
}

impl SizeReport {
    pub fn new(audio: Option<StreamStats>, video: Option<StreamStats>) -> Self {
        let total = audio
            .unwrap_or_default()
            .add(video.unwrap_or_default());
        Self {
            audio,
            video,
            total,
        }
    }
}

/// Frame geometry as it appears in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeometryInfo {
    pub width: u8,
    pub height: u8,
}

impl From<FrameGeometry> for GeometryInfo {
    fn from(geometry: FrameGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
        }
    }
}

/// Structure of a container file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub layout: &'static str,
    pub file_bytes: usize,
    pub header_bytes: usize,
    pub geometry: Option<GeometryInfo>,
    pub audio_bytes: usize,
    pub video_bytes: usize,
    pub trailing_bytes: usize,
    /// Samples decodable from the audio payload; may include up to seven
    /// padding repeats.
    pub audio_samples_max: usize,
    pub audio_seconds_max: f64,
    /// Frames in the video payload, when the geometry allows finding the end.
    pub video_frames: Option<usize>,
    pub video_seconds: Option<f64>,
}

/// Parses a container and measures both streams without a known sample count.
#[allow(clippy::cast_precision_loss)]
pub fn inspect_container(
    bytes: &[u8],
    layout: HeaderLayout,
    container_limits: &ContainerLimits,
    codec_limits: &CodecLimits,
) -> Result<InspectReport, CodecError> {
    let container = decode_container(bytes, layout, container_limits)?;
    let audio_samples_max = decode_audio_to_end(container.audio, codec_limits)?.len();
    let video_frames = match container.header.geometry {
        Some(geometry) if geometry.pixel_count() >= 8 => {
            Some(decode_video_to_end(container.video, geometry, codec_limits)?.len())
        }
        _ if container.video.is_empty() => Some(0),
        _ => None,
    };

    Ok(InspectReport {
        layout: match layout {
            HeaderLayout::Compact => "compact",
            HeaderLayout::WithGeometry => "with_geometry",
        },
        file_bytes: bytes.len(),
        header_bytes: layout.header_size(),
        geometry: container.header.geometry.map(GeometryInfo::from),
        audio_bytes: container.audio.len(),
        video_bytes: container.video.len(),
        trailing_bytes: container.trailing_len,
        audio_samples_max,
        audio_seconds_max: audio_samples_max as f64 / f64::from(AUDIO_SAMPLE_RATE),
        video_frames,
        video_seconds: video_frames.map(|frames| frames as f64 / f64::from(VIDEO_FRAME_RATE)),
    })
}

/// Decoded streams as written by `decode --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub geometry: Option<GeometryInfo>,
    pub audio: Vec<i8>,
    pub frames: Vec<Vec<u8>>,
}

/// Renders size statistics the way the encoder prints them.
pub fn format_size_report(report: &SizeReport) -> String {
    let mut out = String::new();
    if let Some(audio) = &report.audio {
        push_stats(&mut out, "audio", audio);
    }
    if let Some(video) = &report.video {
        push_stats(&mut out, "video", video);
    }
    push_stats(&mut out, "total", &report.total);
    out
}

fn push_stats(out: &mut String, label: &str, stats: &StreamStats) {
    let percent = stats
        .encoded_percent()
        .map_or_else(|| "n/a".to_string(), |percent| format!("{percent:.2}%"));
    let _ = writeln!(out, "{label}:");
    let _ = writeln!(out, "  uncompressed: {} K", stats.uncompressed_bytes / 1024);
    let _ = writeln!(out, "  reduced:      {} K", stats.reduced_bytes / 1024);
    let _ = writeln!(
        out,
        "  encoded:      {} K ({percent})",
        stats.encoded_bytes / 1024
    );
}

/// Renders an inspect report for humans.
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "layout: {} header: {} bytes file: {} bytes",
        report.layout, report.header_bytes, report.file_bytes
    );
    match report.geometry {
        Some(geometry) => {
            let _ = writeln!(out, "geometry: {}x{}", geometry.width, geometry.height);
        }
        None => {
            let _ = writeln!(out, "geometry: not in header");
        }
    }
    let _ = writeln!(
        out,
        "audio: {} bytes, up to {} samples ({:.2} s)",
        report.audio_bytes, report.audio_samples_max, report.audio_seconds_max
    );
    match (report.video_frames, report.video_seconds) {
        (Some(frames), Some(seconds)) => {
            let _ = writeln!(
                out,
                "video: {} bytes, {frames} frames ({seconds:.2} s)",
                report.video_bytes
            );
        }
        _ => {
            let _ = writeln!(
                out,
                "video: {} bytes, frame count unknown",
                report.video_bytes
            );
        }
    }
    if report.trailing_bytes > 0 {
        let _ = writeln!(out, "trailing: {} bytes", report.trailing_bytes);
    }
    out
}
