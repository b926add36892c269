//! Command-line tooling for fpmedia containers.
//!
//! Reads already-transcoded inputs (a PCM WAVE file and a directory of
//! grayscale frame images), encodes them into a container, and inspects or
//! decodes existing containers.

mod media;
mod report;
mod wav;

pub use media::{
    collect_frame_paths, frame_from_image, parse_geometry, read_frames, read_wav, read_wav_bytes,
    AudioInput,
};
pub use report::{
    format_inspect_pretty, format_size_report, inspect_container, DecodeReport, GeometryInfo,
    InspectReport, SizeReport, StreamStats,
};
pub use wav::{reduced_wav_bytes, write_reduced_wav};
