//! Reading already-transcoded inputs: PCM WAVE audio and grayscale frame images.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use codec::{quantize_audio_frame, quantize_frame, FrameGeometry, PcmFormat};
use glob::Pattern;
use image::DynamicImage;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// Quantized audio together with the format it was read in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInput {
    pub format: PcmFormat,
    pub samples: Vec<i8>,
}

impl AudioInput {
    /// Size of the source PCM data in bytes.
    pub fn source_bytes(&self) -> u64 {
        self.samples.len() as u64 * self.format.frame_bytes() as u64
    }
}

/// Reads a PCM WAVE file and quantizes it to 4-bit mono samples.
pub fn read_wav(path: &Path) -> Result<AudioInput> {
    let file = std::fs::File::open(path).with_context(|| format!("open audio {}", path.display()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    read_from_source(mss, path.extension().and_then(|ext| ext.to_str()))
        .with_context(|| format!("read audio {}", path.display()))
}

/// Reads PCM WAVE data from memory.
pub fn read_wav_bytes(bytes: Vec<u8>) -> Result<AudioInput> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());
    read_from_source(mss, Some("wav"))
}

fn read_from_source(mss: MediaSourceStream, extension: Option<&str>) -> Result<AudioInput> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("unsupported audio format")?;
    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("no audio track found")?;
    let track_id = track.id;
    let params = &track.codec_params;
    let sample_rate = params.sample_rate.context("unknown sample rate")?;
    let channels = params.channels.context("unknown channel count")?.count();
    let bits_per_sample = params.bits_per_sample.context("unknown bit depth")?;
    let format = PcmFormat::new(
        sample_rate,
        u16::try_from(channels).context("too many channels")?,
        u16::try_from(bits_per_sample).context("unsupported bit depth")?,
    );
    format.validate()?;
    debug!(sample_rate, channels, bits_per_sample, "audio track");

    let mut decoder = symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .context("failed to create audio decoder")?;

    let mut samples = Vec::new();
    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(err) => return Err(err).context("error reading audio packet"),
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => append_samples(&decoded, &mut samples)?,
            Err(SymphoniaError::DecodeError(reason)) => {
                warn!(reason, "skipping undecodable audio packet");
            }
            Err(err) => return Err(err).context("error decoding audio packet"),
        }
    }

    ensure!(!samples.is_empty(), "audio contains no samples");
    Ok(AudioInput { format, samples })
}

fn append_samples(buffer: &AudioBufferRef<'_>, samples: &mut Vec<i8>) -> Result<()> {
    match buffer {
        AudioBufferRef::U8(buf) => append_frames(&**buf, 8, i32::from, samples),
        AudioBufferRef::S16(buf) => append_frames(&**buf, 16, i32::from, samples),
        AudioBufferRef::S24(buf) => append_frames(&**buf, 24, |s| s.inner(), samples),
        AudioBufferRef::S32(buf) => append_frames(&**buf, 32, |s| s, samples),
        _ => bail!("only integer PCM audio is supported"),
    }
}

fn append_frames<S: Sample>(
    buf: &AudioBuffer<S>,
    bits_per_sample: u16,
    widen: impl Fn(S) -> i32,
    samples: &mut Vec<i8>,
) -> Result<()> {
    let channels = buf.spec().channels.count();
    let mut values = vec![0i32; channels];
    samples.reserve(buf.frames());
    for frame in 0..buf.frames() {
        for (channel, value) in values.iter_mut().enumerate() {
            *value = widen(buf.chan(channel)[frame]);
        }
        samples.push(quantize_audio_frame(&values, bits_per_sample)?);
    }
    Ok(())
}

/// Parses `WxH` (or `W:H`) into a frame geometry.
pub fn parse_geometry(value: &str) -> Result<FrameGeometry, String> {
    let (width, height) = value
        .split_once(['x', 'X', ':'])
        .ok_or_else(|| format!("expected WxH, got {value:?}"))?;
    let width: u8 = width
        .trim()
        .parse()
        .map_err(|err| format!("invalid width {width:?}: {err}"))?;
    let height: u8 = height
        .trim()
        .parse()
        .map_err(|err| format!("invalid height {height:?}: {err}"))?;
    if width == 0 || height == 0 {
        return Err(format!("geometry must be non-zero, got {width}x{height}"));
    }
    Ok(FrameGeometry::new(width, height))
}

/// Lists frame images in `dir` whose file names match `pattern`, in name order.
pub fn collect_frame_paths(dir: &Path, pattern: &Pattern) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name));
        if matches {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Reads and quantizes every matching frame image in `dir`.
pub fn read_frames(dir: &Path, pattern: &Pattern, geometry: FrameGeometry) -> Result<Vec<Vec<u8>>> {
    let paths = collect_frame_paths(dir, pattern)?;
    debug!(count = paths.len(), dir = %dir.display(), "frame images");
    paths
        .iter()
        .map(|path| {
            let image =
                image::open(path).with_context(|| format!("read frame {}", path.display()))?;
            frame_from_image(&image, geometry)
                .with_context(|| format!("frame {}", path.display()))
        })
        .collect()
}

/// Converts an image to grayscale and quantizes it to 4-bit pixels.
///
/// The image must already have the target geometry; scaling is left to the
/// transcoder that produced it.
pub fn frame_from_image(image: &DynamicImage, geometry: FrameGeometry) -> Result<Vec<u8>> {
    let luma = image.to_luma8();
    ensure!(
        luma.width() == u32::from(geometry.width) && luma.height() == u32::from(geometry.height),
        "image is {}x{}, expected {}x{}",
        luma.width(),
        luma.height(),
        geometry.width,
        geometry.height
    );
    Ok(quantize_frame(luma.as_raw()))
}
