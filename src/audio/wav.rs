//! WAV encoder for stitched audio.
//!
//! Produces 16-bit PCM WAV with a fixed 44-byte header. The layout is
//! written by hand so the bytes match what browsers and media players
//! expect for this clip format exactly.

use std::path::Path;

use crate::error::{ErrorCode, Result, StampError};
use crate::types::PcmBuffer;

/// Size of the RIFF/WAVE/fmt/data header in bytes.
pub const HEADER_LEN: usize = 44;

/// Bits per encoded sample.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Encodes a mono or stereo buffer as a 16-bit PCM WAV file in memory.
///
/// Stereo is interleaved frame by frame; mono passes straight through.
/// The byte-rate field is always `sample_rate * 4`, so mono files disagree
/// with their block align and strict parsers such as hound refuse them.
///
/// # Example
///
/// ```ignore
/// use timestamp_voice::audio::encode_wav;
/// use timestamp_voice::types::PcmBuffer;
///
/// let buffer = PcmBuffer::mono(8000, vec![0.0, 0.5, -1.0, 1.0])?;
/// let bytes = encode_wav(&buffer)?;
/// assert_eq!(bytes.len(), 44 + 8);
/// ```
pub fn encode_wav(buffer: &PcmBuffer) -> Result<Vec<u8>> {
    let channels = buffer.num_channels();
    if channels > 2 {
        return Err(StampError::encode_failed(format!(
            "{} channels (only mono and stereo are supported)",
            channels
        )));
    }

    let samples = buffer.interleaved();
    let data_len = u32::try_from(samples.len() * 2)
        .ok()
        .filter(|len| len.checked_add(36).is_some())
        .ok_or_else(|| {
            StampError::encode_failed(format!(
                "{} samples exceed the WAV size limit",
                samples.len()
            ))
        })?;

    let sample_rate = buffer.sample_rate();
    let mut wav = Vec::with_capacity(HEADER_LEN + data_len as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk length
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&(channels as u16).to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&sample_rate.wrapping_mul(4).to_le_bytes()); // byte rate
    wav.extend_from_slice(&(channels as u16 * 2).to_le_bytes()); // block align
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    for sample in samples {
        wav.extend_from_slice(&float_to_i16(sample).to_le_bytes());
    }

    Ok(wav)
}

/// Writes a buffer to a WAV file.
pub fn write_wav(buffer: &PcmBuffer, path: &Path) -> Result<()> {
    let bytes = encode_wav(buffer)?;
    std::fs::write(path, bytes).map_err(|e| {
        StampError::with_source(
            ErrorCode::ExportFailed,
            format!("Failed to write WAV file {}", path.display()),
            e,
        )
    })
}

/// Converts a float sample to signed 16-bit.
///
/// Clamps to [-1, 1]; negative values scale by 0x8000, the rest by 0x7FFF.
pub fn float_to_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if s < 0.0 {
        s * 0x8000 as f32
    } else {
        s * 0x7FFF as f32
    };
    scaled.round() as i16
}
