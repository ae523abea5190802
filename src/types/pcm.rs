//! Decoded PCM audio.

use std::collections::HashMap;

use super::field::Field;
use crate::error::{Result, StampError};

/// Planar floating-point PCM audio at a fixed sample rate.
///
/// Every channel holds the same number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    pub(crate) sample_rate: u32,
    pub(crate) channels: Vec<Vec<f32>>,
}

impl PcmBuffer {
    /// Creates a buffer from per-channel sample vectors.
    ///
    /// Fails if there are no channels, the sample rate is zero, or the
    /// channels differ in length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(StampError::decode_failed("sample rate is zero"));
        }
        let Some(first) = channels.first() else {
            return Err(StampError::decode_failed("buffer has no channels"));
        };
        let frames = first.len();
        if let Some((index, ragged)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != frames)
        {
            return Err(StampError::decode_failed(format!(
                "channel {} has {} frames, expected {}",
                index,
                ragged.len(),
                frames
            )));
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Creates a single-channel buffer.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, vec![samples])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples of one channel, or `None` past the last channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Samples interleaved frame by frame (L, R, L, R, ... for stereo).
    pub fn interleaved(&self) -> Vec<f32> {
        match self.channels.as_slice() {
            [mono] => mono.clone(),
            channels => {
                let mut out = Vec::with_capacity(self.len() * channels.len());
                for frame in 0..self.len() {
                    for channel in channels {
                        out.push(channel[frame]);
                    }
                }
                out
            }
        }
    }
}

/// Decoded buffers keyed by the field they belong to.
#[derive(Debug, Clone, Default)]
pub struct DecodedAudio {
    buffers: HashMap<Field, PcmBuffer>,
}

impl DecodedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the buffer for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, buffer: PcmBuffer) {
        self.buffers.insert(field, buffer);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true once every field of the canonical order is present.
    #[cfg(test)]
    pub(crate) fn is_complete(&self) -> bool {
        Field::CANONICAL_ORDER
            .iter()
            .all(|field| self.buffers.contains_key(field))
    }

    /// Consumes the map, yielding buffers in canonical field order.
    ///
    /// Fails naming the first field with no buffer.
    pub fn into_canonical_order(mut self) -> Result<Vec<PcmBuffer>> {
        Field::CANONICAL_ORDER
            .iter()
            .map(|field| {
                self.buffers
                    .remove(field)
                    .ok_or_else(|| StampError::missing_field(*field))
            })
            .collect()
    }
}

impl FromIterator<(Field, PcmBuffer)> for DecodedAudio {
    fn from_iter<I: IntoIterator<Item = (Field, PcmBuffer)>>(iter: I) -> Self {
        Self {
            buffers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn ragged_channels_rejected() {
        let err = PcmBuffer::new(8000, vec![vec![0.0; 4], vec![0.0; 3]]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecodeFailed);
        assert!(PcmBuffer::new(8000, vec![]).is_err());
        assert!(PcmBuffer::new(0, vec![vec![0.0]]).is_err());
    }

    #[test]
    fn duration_from_frames() {
        let buffer = PcmBuffer::new(8000, vec![vec![0.0; 4000], vec![0.0; 4000]]).unwrap();
        assert_eq!(buffer.len(), 4000);
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.duration_secs(), 0.5);
    }

    #[test]
    fn interleave_stereo() {
        let buffer = PcmBuffer::new(8000, vec![vec![1.0, 2.0], vec![-1.0, -2.0]]).unwrap();
        assert_eq!(buffer.interleaved(), vec![1.0, -1.0, 2.0, -2.0]);

        let mono = PcmBuffer::mono(8000, vec![0.25, 0.5]).unwrap();
        assert_eq!(mono.interleaved(), vec![0.25, 0.5]);
    }

    #[test]
    fn canonical_order_regardless_of_insertion() {
        let mut decoded = DecodedAudio::new();
        for (i, field) in Field::CANONICAL_ORDER.iter().rev().enumerate() {
            decoded.insert(*field, PcmBuffer::mono(8000, vec![i as f32]).unwrap());
        }
        assert!(decoded.is_complete());
        assert_eq!(decoded.len(), 9);

        let ordered = decoded.into_canonical_order().unwrap();
        let firsts: Vec<f32> = ordered.iter().map(|b| b.channel(0).unwrap()[0]).collect();
        assert_eq!(firsts, vec![8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn missing_field_reported() {
        let decoded: DecodedAudio = Field::CANONICAL_ORDER
            .iter()
            .filter(|f| **f != Field::Month)
            .map(|f| (*f, PcmBuffer::mono(8000, vec![0.0]).unwrap()))
            .collect();
        assert!(!decoded.is_complete());

        let err = decoded.into_canonical_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteAssembly);
        assert!(err.message.contains("month"));
    }
}
