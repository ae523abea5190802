//! Snippet decoder using symphonia.
//!
//! Decodes a compressed payload held in memory (MP3, WAV/PCM) to planar
//! f32 samples.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::error::{Result, StampError};
use crate::types::PcmBuffer;

/// Decodes an entire payload to PCM.
///
/// `hint` is a file extension used to speed up format detection.
///
/// # Errors
/// - Unrecognised container or codec
/// - I/O error inside the stream
/// - Stream contains no audio frames
pub fn decode_audio(bytes: Vec<u8>, hint: Option<&str>) -> Result<PcmBuffer> {
    let payload_len = bytes.len();
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut probe_hint = Hint::new();
    if let Some(extension) = hint {
        probe_hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &probe_hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| StampError::decode_failed(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| StampError::decode_failed("No audio track found"))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| StampError::decode_failed(format!("Failed to create decoder: {}", e)))?;

    let mut channels: Vec<Vec<f32>> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(StampError::decode_failed(format!(
                    "Failed to read packet: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                warn!("Skipping corrupt packet: {}", e);
                continue;
            }
            Err(e) => {
                return Err(StampError::decode_failed(format!(
                    "Decoder failed: {}",
                    e
                )))
            }
        };

        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let spec = *decoded.spec();
        let count = spec.channels.count();
        if channels.is_empty() {
            channels = vec![Vec::new(); count];
            sample_rate.get_or_insert(spec.rate);
        } else if channels.len() != count {
            return Err(StampError::decode_failed(format!(
                "Channel count changed mid-stream from {} to {}",
                channels.len(),
                count
            )));
        }

        let mut samples = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        samples.copy_planar_ref(decoded);
        let planar = samples.samples();

        for (index, channel) in channels.iter_mut().enumerate() {
            channel.extend_from_slice(&planar[index * frames..(index + 1) * frames]);
        }
    }

    if channels.is_empty() {
        return Err(StampError::decode_failed("Stream contains no audio frames"));
    }

    let sample_rate =
        sample_rate.ok_or_else(|| StampError::decode_failed("Sample rate not found"))?;
    let buffer = PcmBuffer::new(sample_rate, channels)?;

    debug!(
        payload_bytes = payload_len,
        frames = buffer.len(),
        channels = buffer.num_channels(),
        sample_rate,
        "Decoded snippet"
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::wav_bytes;
    use crate::error::ErrorCode;

    #[test]
    fn decodes_mono_wav() {
        let bytes = wav_bytes(8000, 1, &[0.0, 0.5, -0.5, 0.25]);
        let buffer = decode_audio(bytes, Some("wav")).unwrap();

        assert_eq!(buffer.sample_rate(), 8000);
        assert_eq!(buffer.num_channels(), 1);
        assert_eq!(buffer.len(), 4);

        let expected = [0.0f32, 0.5, -0.5, 0.25];
        for (got, want) in buffer.channel(0).unwrap().iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn decodes_stereo_wav_to_planar() {
        // Interleaved L, R frames
        let bytes = wav_bytes(22050, 2, &[0.5, -0.5, 0.25, -0.25, 0.0, 0.0]);
        let buffer = decode_audio(bytes, None).unwrap();

        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.channel(0).unwrap().iter().all(|s| *s >= 0.0));
        assert!(buffer.channel(1).unwrap().iter().all(|s| *s <= 0.0));
    }

    #[test]
    fn garbage_payload_fails() {
        let err = decode_audio(b"definitely not audio".to_vec(), Some("mp3")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecodeFailed);
    }
}
