use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use codec::{
    decode_media, encode_media, CodecLimits, ContainerLimits, DecodeRequest, FrameGeometry,
    HeaderLayout,
};
use fpmedia_tools::{
    format_inspect_pretty, format_size_report, inspect_container, parse_geometry, read_frames,
    read_wav, write_reduced_wav, AudioInput, DecodeReport, GeometryInfo, SizeReport, StreamStats,
};
use glob::Pattern;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fpmedia",
    version,
    about = "Encode, inspect and decode fpmedia containers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a WAVE file and/or a directory of frame images into a container.
    Encode {
        /// 44.1 kHz PCM WAVE input.
        #[arg(long)]
        audio: Option<PathBuf>,
        /// Directory of grayscale frame images, already scaled to the geometry.
        #[arg(long)]
        frames: Option<PathBuf>,
        /// Glob matched against frame file names.
        #[arg(long, default_value = "*.png")]
        pattern: String,
        /// Frame geometry as WxH.
        #[arg(long, value_parser = parse_geometry, default_value = "32x24")]
        geometry: FrameGeometry,
        /// Output container path.
        #[arg(long, short)]
        output: PathBuf,
        /// Omit the geometry from the header.
        #[arg(long)]
        compact_header: bool,
        /// Also write the quantized audio as an 8-bit WAVE file.
        #[arg(long)]
        dump_audio: Option<PathBuf>,
    },
    /// Print container structure and stream sizes.
    Inspect {
        /// Container path.
        file: PathBuf,
        /// The container has no geometry in its header.
        #[arg(long)]
        compact_header: bool,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Decode a container back to quantized samples.
    Decode {
        /// Container path.
        file: PathBuf,
        /// The container has no geometry in its header.
        #[arg(long)]
        compact_header: bool,
        /// Number of audio samples to decode; without it padding may add a few samples.
        #[arg(long)]
        audio_samples: Option<usize>,
        /// Number of video frames to decode.
        #[arg(long)]
        frames: Option<usize>,
        /// Frame geometry as WxH, for containers without one in the header.
        #[arg(long, value_parser = parse_geometry)]
        geometry: Option<FrameGeometry>,
        /// Write the decoded streams as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write the decoded audio as an 8-bit WAVE file.
        #[arg(long)]
        dump_audio: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            audio,
            frames,
            pattern,
            geometry,
            output,
            compact_header,
            dump_audio,
        } => {
            let pattern = Pattern::new(&pattern).context("invalid frame pattern")?;
            encode(&EncodeArgs {
                audio: audio.as_deref(),
                frames: frames.as_deref(),
                pattern: &pattern,
                geometry,
                output: &output,
                layout: layout(compact_header),
                dump_audio: dump_audio.as_deref(),
            })?;
        }
        Command::Inspect {
            file,
            compact_header,
            json,
        } => {
            let bytes = read_container(&file)?;
            let report = inspect_container(
                &bytes,
                layout(compact_header),
                &ContainerLimits::default(),
                &CodecLimits::default(),
            )
            .with_context(|| format!("inspect {}", file.display()))?;
            if json {
                let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                println!("{json}");
            } else {
                print!("{}", format_inspect_pretty(&report));
            }
        }
        Command::Decode {
            file,
            compact_header,
            audio_samples,
            frames,
            geometry,
            json,
            dump_audio,
        } => {
            let request = DecodeRequest {
                audio_samples,
                video_frames: frames,
                geometry,
            };
            decode(
                &file,
                layout(compact_header),
                &request,
                json.as_deref(),
                dump_audio.as_deref(),
            )?;
        }
    }
    Ok(())
}

struct EncodeArgs<'a> {
    audio: Option<&'a Path>,
    frames: Option<&'a Path>,
    pattern: &'a Pattern,
    geometry: FrameGeometry,
    output: &'a Path,
    layout: HeaderLayout,
    dump_audio: Option<&'a Path>,
}

fn encode(args: &EncodeArgs<'_>) -> Result<()> {
    if args.audio.is_none() && args.frames.is_none() {
        bail!("nothing to encode: pass --audio and/or --frames");
    }

    let audio = args.audio.map(read_wav).transpose()?;
    if let Some(input) = &audio {
        info!(
            samples = input.samples.len(),
            channels = input.format.channels,
            bits = input.format.bits_per_sample,
            "audio stream read"
        );
    } else {
        info!("no audio stream");
    }

    let frames = match args.frames {
        Some(dir) => read_frames(dir, args.pattern, args.geometry)?,
        None => Vec::new(),
    };
    if args.frames.is_some() && frames.is_empty() {
        bail!("no frame images matched {}", args.pattern);
    }
    if frames.is_empty() {
        info!("no video stream");
    } else {
        info!(
            frames = frames.len(),
            width = args.geometry.width,
            height = args.geometry.height,
            "video stream read"
        );
    }

    let samples = audio.as_ref().map_or(&[][..], |input| &input.samples[..]);
    let bytes = encode_media(samples, &frames, args.geometry, args.layout)
        .context("encode container")?;
    fs::write(args.output, &bytes)
        .with_context(|| format!("write container {}", args.output.display()))?;
    info!(bytes = bytes.len(), path = %args.output.display(), "container written");

    let report = size_report(audio.as_ref(), &frames, args.geometry, &bytes, args.layout)?;
    print!("{}", format_size_report(&report));

    if let (Some(path), Some(input)) = (args.dump_audio, &audio) {
        write_reduced_wav(path, &input.samples)?;
        info!(path = %path.display(), "reduced audio written");
    }
    Ok(())
}

fn size_report(
    audio: Option<&AudioInput>,
    frames: &[Vec<u8>],
    geometry: FrameGeometry,
    container: &[u8],
    layout: HeaderLayout,
) -> Result<SizeReport> {
    let parsed = container::decode_container(container, layout, &ContainerLimits::unlimited())
        .context("re-read container")?;
    let audio = audio.map(|input| {
        StreamStats::audio(input.samples.len(), input.source_bytes(), parsed.audio.len())
    });
    let video = (!frames.is_empty())
        .then(|| StreamStats::video(frames.len(), geometry, parsed.video.len()));
    Ok(SizeReport::new(audio, video))
}

fn decode(
    file: &Path,
    layout: HeaderLayout,
    request: &DecodeRequest,
    json: Option<&Path>,
    dump_audio: Option<&Path>,
) -> Result<()> {
    let bytes = read_container(file)?;
    let decoded = decode_media(
        &bytes,
        layout,
        request,
        &ContainerLimits::default(),
        &CodecLimits::default(),
    )
    .with_context(|| format!("decode {}", file.display()))?;

    if request.audio_samples.is_none() && !decoded.audio.is_empty() {
        warn!("no audio sample count given; trailing padding may add up to 7 samples");
    }
    info!(
        audio_samples = decoded.audio.len(),
        frames = decoded.video.len(),
        "decoded"
    );

    if let Some(path) = dump_audio {
        write_reduced_wav(path, &decoded.audio)?;
        info!(path = %path.display(), "reduced audio written");
    }
    if let Some(path) = json {
        let report = DecodeReport {
            geometry: decoded.geometry.map(GeometryInfo::from),
            audio: decoded.audio,
            frames: decoded.video,
        };
        let out = fs::File::create(path)
            .with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer(std::io::BufWriter::new(out), &report).context("write json")?;
        debug!(path = %path.display(), "decode report written");
    }
    Ok(())
}

fn read_container(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("read container {}", path.display()))?;
    debug!(bytes = bytes.len(), path = %path.display(), "container read");
    Ok(bytes)
}

const fn layout(compact_header: bool) -> HeaderLayout {
    if compact_header {
        HeaderLayout::Compact
    } else {
        HeaderLayout::WithGeometry
    }
}
