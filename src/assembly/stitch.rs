//! Concatenation of decoded snippets.

use tracing::{debug, warn};

use crate::config::ChannelPolicy;
use crate::error::{Result, StampError};
use crate::types::{DecodedAudio, PcmBuffer};

/// Appends `right` to `left`.
///
/// The result has `min(left, right)` channels and left's sample rate. Under
/// [`ChannelPolicy::Strict`] differing channel counts are an error instead.
pub fn concat_pair(
    mut left: PcmBuffer,
    right: &PcmBuffer,
    policy: ChannelPolicy,
) -> Result<PcmBuffer> {
    let (left_channels, right_channels) = (left.num_channels(), right.num_channels());

    if left_channels != right_channels {
        if policy == ChannelPolicy::Strict {
            return Err(StampError::channel_mismatch(left_channels, right_channels));
        }
        debug!(
            left_channels,
            right_channels, "Dropping channels beyond the shared count"
        );
    }

    if left.sample_rate() != right.sample_rate() {
        warn!(
            left_rate = left.sample_rate(),
            right_rate = right.sample_rate(),
            "Joining snippets with different sample rates; keeping the left rate"
        );
    }

    let shared = left_channels.min(right_channels);
    left.channels.truncate(shared);
    for (channel, tail) in left.channels.iter_mut().zip(&right.channels) {
        channel.extend_from_slice(tail);
    }

    Ok(left)
}

/// Folds buffers left to right with [`concat_pair`].
///
/// Fails on an empty sequence.
pub fn stitch<I>(buffers: I, policy: ChannelPolicy) -> Result<PcmBuffer>
where
    I: IntoIterator<Item = PcmBuffer>,
{
    let mut buffers = buffers.into_iter();
    let first = buffers.next().ok_or_else(StampError::nothing_to_stitch)?;
    buffers.try_fold(first, |acc, next| concat_pair(acc, &next, policy))
}

/// Stitches a complete decode result in canonical field order.
pub fn stitch_decoded(decoded: DecodedAudio, policy: ChannelPolicy) -> Result<PcmBuffer> {
    stitch(decoded.into_canonical_order()?, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::Field;

    fn mono(samples: &[f32]) -> PcmBuffer {
        PcmBuffer::mono(8000, samples.to_vec()).unwrap()
    }

    #[test]
    fn concat_appends_samples() {
        let joined = concat_pair(mono(&[1.0, 2.0]), &mono(&[3.0]), ChannelPolicy::DropExtra).unwrap();
        assert_eq!(joined.channel(0).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(joined.sample_rate(), 8000);
    }

    #[test]
    fn mixed_channel_counts_keep_minimum() {
        let stereo = PcmBuffer::new(8000, vec![vec![0.5, 0.5], vec![-0.5, -0.5]]).unwrap();

        let joined = concat_pair(mono(&[0.1]), &stereo, ChannelPolicy::DropExtra).unwrap();
        assert_eq!(joined.num_channels(), 1);
        assert_eq!(joined.channel(0).unwrap(), &[0.1, 0.5, 0.5]);

        let joined = concat_pair(stereo, &mono(&[0.1]), ChannelPolicy::DropExtra).unwrap();
        assert_eq!(joined.num_channels(), 1);
        assert_eq!(joined.len(), 3);
    }

    #[test]
    fn strict_policy_rejects_mismatch() {
        let stereo = PcmBuffer::new(8000, vec![vec![0.5], vec![-0.5]]).unwrap();
        let err = concat_pair(mono(&[0.1]), &stereo, ChannelPolicy::Strict).unwrap_err();
        assert_eq!(err.code, ErrorCode::ChannelMismatch);
    }

    #[test]
    fn sample_rate_comes_from_left() {
        let high = PcmBuffer::mono(16000, vec![0.0; 2]).unwrap();
        let joined = concat_pair(mono(&[0.0]), &high, ChannelPolicy::DropExtra).unwrap();
        assert_eq!(joined.sample_rate(), 8000);
        assert_eq!(joined.len(), 3);
    }

    #[test]
    fn stitched_length_is_sum_of_lengths() {
        let buffers: Vec<PcmBuffer> = (1..=9).map(|n| mono(&vec![0.0; n * 100])).collect();
        let total: usize = buffers.iter().map(PcmBuffer::len).sum();
        let total_secs: f64 = buffers.iter().map(PcmBuffer::duration_secs).sum();

        let stitched = stitch(buffers, ChannelPolicy::DropExtra).unwrap();
        assert_eq!(stitched.len(), total);
        assert!((stitched.duration_secs() - total_secs).abs() < 1e-9);
    }

    #[test]
    fn stitching_is_order_sensitive() {
        let buffers: Vec<PcmBuffer> = (0..9).map(|n| mono(&[n as f32])).collect();
        let mut swapped = buffers.clone();
        swapped.swap(1, 2);

        let forward = stitch(buffers, ChannelPolicy::DropExtra).unwrap();
        let reordered = stitch(swapped, ChannelPolicy::DropExtra).unwrap();
        assert_ne!(forward, reordered);
        assert_eq!(
            forward.channel(0).unwrap(),
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
    }

    #[test]
    fn empty_sequence_is_incomplete() {
        let err = stitch(Vec::<PcmBuffer>::new(), ChannelPolicy::DropExtra).unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteAssembly);
    }

    #[test]
    fn stitch_decoded_uses_canonical_order() {
        let decoded: DecodedAudio = Field::CANONICAL_ORDER
            .iter()
            .rev()
            .enumerate()
            .map(|(i, field)| (*field, mono(&[i as f32])))
            .collect();

        let stitched = stitch_decoded(decoded, ChannelPolicy::DropExtra).unwrap();
        assert_eq!(
            stitched.channel(0).unwrap(),
            &[8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]
        );
    }
}
