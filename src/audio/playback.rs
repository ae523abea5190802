//! Playback of stitched audio through the default output device.
//!
//! Real output requires the `playback` feature; without it every call
//! returns a PLAYBACK_UNAVAILABLE error so callers can fall back to export.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, StampError};
use crate::types::PcmBuffer;

/// Plays a buffer, blocking the calling thread until playback ends.
#[cfg(feature = "playback")]
pub fn play_blocking(buffer: &PcmBuffer) -> Result<()> {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStreamBuilder, Sink};

    let stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| StampError::playback_failed(format!("no output device: {}", e)))?;
    let sink = Sink::connect_new(stream.mixer());

    debug!(
        channels = buffer.num_channels(),
        sample_rate = buffer.sample_rate(),
        duration_sec = buffer.duration_secs(),
        "Starting playback"
    );

    sink.append(SamplesBuffer::new(
        buffer.num_channels() as u16,
        buffer.sample_rate(),
        buffer.interleaved(),
    ));
    sink.sleep_until_end();

    debug!("Playback finished");
    Ok(())
}

/// Plays a buffer, blocking the calling thread until playback ends.
#[cfg(not(feature = "playback"))]
pub fn play_blocking(buffer: &PcmBuffer) -> Result<()> {
    debug!(
        duration_sec = buffer.duration_secs(),
        "Playback requested without the playback feature"
    );
    Err(StampError::playback_unavailable())
}

/// Plays a buffer on a blocking thread, resuming once playback ends.
pub async fn play(buffer: Arc<PcmBuffer>) -> Result<()> {
    tokio::task::spawn_blocking(move || play_blocking(&buffer))
        .await
        .map_err(|e| StampError::playback_failed(format!("playback thread failed: {}", e)))?
}
