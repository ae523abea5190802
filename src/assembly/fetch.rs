//! Concurrent retrieval and decoding of every timestamp snippet.

use std::time::Duration;

use futures::future::try_join_all;
use tokio::time::timeout;
use tracing::debug;

use crate::assets::{decode_audio, AssetSource};
use crate::error::{Result, StampError};
use crate::types::{DecodedAudio, Field, PcmBuffer, TimestampParts};

/// Fetches and decodes the snippet of every field of `parts`.
///
/// All retrievals run concurrently and completion order does not matter.
/// Each retrieval is bounded by `limit`. The first failure aborts the whole
/// assembly with an error naming the asset; there is no partial result.
pub async fn fetch_and_decode<S: AssetSource>(
    source: &S,
    parts: &TimestampParts,
    limit: Duration,
) -> Result<DecodedAudio> {
    let pending = parts
        .assets()
        .into_iter()
        .map(|(field, asset)| fetch_one(source, field, asset, limit));

    let decoded = try_join_all(pending).await?;
    Ok(decoded.into_iter().collect())
}

async fn fetch_one<S: AssetSource>(
    source: &S,
    field: Field,
    asset: String,
    limit: Duration,
) -> Result<(Field, PcmBuffer)> {
    let bytes = timeout(limit, source.fetch(&asset))
        .await
        .map_err(|_| StampError::fetch_timeout(field, &asset, limit))?
        .map_err(|e| e.in_field(field).for_asset(&asset))?;

    debug!(%field, asset = %asset, bytes = bytes.len(), "Fetched snippet");

    let buffer = decode_audio(bytes, source.format_hint()).map_err(|e| {
        StampError {
            message: format!("{} (asset '{}' at {})", e.message, asset, source.locate(&asset)),
            ..e
        }
        .in_field(field)
        .for_asset(&asset)
    })?;

    Ok((field, buffer))
}
