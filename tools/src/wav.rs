//! Reduced-audio WAVE output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use codec::{dequantize_audio_sample, AUDIO_SAMPLE_RATE};

const RIFF_HEADER_BYTES: usize = 44;

/// Writes quantized samples as an 8-bit unsigned mono WAVE file.
pub fn write_reduced_wav(path: &Path, samples: &[i8]) -> Result<()> {
    let bytes = reduced_wav_bytes(samples)?;
    std::fs::write(path, bytes).with_context(|| format!("write wav {}", path.display()))
}

/// Builds an 8-bit unsigned mono WAVE file in memory.
pub fn reduced_wav_bytes(samples: &[i8]) -> Result<Vec<u8>> {
    let data_size = u32::try_from(samples.len()).context("audio too long for a wav file")?;
    let file_size = data_size
        .checked_add(36)
        .context("audio too long for a wav file")?;

    let mut buffer = Vec::with_capacity(RIFF_HEADER_BYTES + samples.len());
    buffer.write_all(b"RIFF")?;
    buffer.write_all(&file_size.to_le_bytes())?;
    buffer.write_all(b"WAVE")?;

    buffer.write_all(b"fmt ")?;
    buffer.write_all(&16u32.to_le_bytes())?;
    buffer.write_all(&1u16.to_le_bytes())?; // PCM
    buffer.write_all(&1u16.to_le_bytes())?; // mono
    buffer.write_all(&AUDIO_SAMPLE_RATE.to_le_bytes())?;
    buffer.write_all(&AUDIO_SAMPLE_RATE.to_le_bytes())?; // byte rate
    buffer.write_all(&1u16.to_le_bytes())?; // block align
    buffer.write_all(&8u16.to_le_bytes())?;

    buffer.write_all(b"data")?;
    buffer.write_all(&data_size.to_le_bytes())?;
    buffer.extend(samples.iter().copied().map(dequantize_audio_sample));

    Ok(buffer)
}
