//! Assembly pipeline for spoken timestamps.
//!
//! Orchestrates fetching, decoding and stitching, memoizes the stitched
//! clip, and dispatches it to playback or WAV export.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::fetch::fetch_and_decode;
use super::stitch::stitch_decoded;
use crate::assets::AssetSource;
use crate::audio::{play, write_wav};
use crate::cache::StitchCache;
use crate::config::StampConfig;
use crate::error::{Result, StampError};
use crate::types::{PcmBuffer, TimestampParts};

/// Assembles timestamps from one asset source.
///
/// The assembler owns its stitch cache; repeated identical requests made
/// through the same assembler reuse the stitched clip.
pub struct Assembler<S> {
    source: S,
    cache: StitchCache,
    config: StampConfig,
}

impl<S: AssetSource> Assembler<S> {
    /// Creates an assembler with a cache sized from `config`.
    pub fn new(source: S, config: StampConfig) -> Self {
        Self {
            source,
            cache: StitchCache::with_capacity(config.cache_entries),
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the stitched clip for `parts`, fetching only on a cache miss.
    pub async fn assemble(&mut self, parts: &TimestampParts) -> Result<Arc<PcmBuffer>> {
        if let Some(buffer) = self.cache.get(parts) {
            info!(%parts, "Reusing cached clip");
            return Ok(buffer);
        }

        let start_time = Instant::now();
        debug!(
            %parts,
            timeout_ms = self.config.fetch_timeout_ms,
            "Fetching {} snippets",
            parts.assets().len()
        );

        let decoded = fetch_and_decode(&self.source, parts, self.config.fetch_timeout()).await?;
        let stitched = Arc::new(stitch_decoded(decoded, self.config.channel_policy)?);

        info!(
            %parts,
            frames = stitched.len(),
            channels = stitched.num_channels(),
            sample_rate = stitched.sample_rate(),
            duration_sec = stitched.duration_secs(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Assembled clip"
        );

        self.cache.put(*parts, Arc::clone(&stitched));
        Ok(stitched)
    }

    /// Assembles `parts` and plays the clip, returning once playback ends.
    pub async fn play(&mut self, parts: &TimestampParts) -> Result<()> {
        let buffer = self.assemble(parts).await?;
        play(buffer).await
    }

    /// Assembles `parts` and writes the clip as WAV to `path`.
    pub async fn export(&mut self, parts: &TimestampParts, path: &Path) -> Result<PathBuf> {
        let buffer = self.assemble(parts).await?;
        let dest = path.to_path_buf();

        let written = dest.clone();
        tokio::task::spawn_blocking(move || write_wav(&buffer, &written))
            .await
            .map_err(|e| StampError::export_failed(format!("writer thread failed: {}", e)))??;

        info!(path = %dest.display(), "Exported clip");
        Ok(dest)
    }

    /// Exports to the configured output path.
    pub async fn export_default(&mut self, parts: &TimestampParts) -> Result<PathBuf> {
        let path = self.config.effective_output_path();
        self.export(parts, &path).await
    }
}
