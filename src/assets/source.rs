//! Asset sources.
//!
//! An asset is located as `<base>/<id>.<ext>`, e.g. `resources/hour_7.mp3`.
//! The base is either an HTTP(S) URL prefix or a local directory.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, StampError};

/// Connect timeout for the HTTP client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that can retrieve the compressed payload of a named snippet.
#[allow(async_fn_in_trait)]
pub trait AssetSource {
    /// Returns where an asset lives, for logs and error messages.
    fn locate(&self, asset: &str) -> String;

    /// Container hint passed to the decoder, usually the file extension.
    fn format_hint(&self) -> Option<&str> {
        None
    }

    /// Retrieves the raw bytes of an asset.
    ///
    /// Errors name the asset identifier.
    async fn fetch(&self, asset: &str) -> Result<Vec<u8>>;
}

/// Fetches assets over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
    extension: String,
}

impl HttpSource {
    /// Creates a source rooted at a URL prefix.
    pub fn new(base: impl Into<String>, extension: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                StampError::invalid_config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
            extension: extension.into(),
        })
    }
}

impl AssetSource for HttpSource {
    fn locate(&self, asset: &str) -> String {
        format!("{}/{}.{}", self.base, asset, self.extension)
    }

    fn format_hint(&self) -> Option<&str> {
        Some(self.extension.as_str())
    }

    async fn fetch(&self, asset: &str) -> Result<Vec<u8>> {
        let url = self.locate(asset);
        debug!(asset, url = %url, "Requesting asset");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StampError::fetch_failed(asset, format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(StampError::fetch_failed(
                asset,
                format!("HTTP {} for {}", response.status(), url),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StampError::fetch_failed(asset, format!("Failed to read response: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

/// Reads assets from a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    extension: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    fn path_for(&self, asset: &str) -> PathBuf {
        self.root.join(format!("{}.{}", asset, self.extension))
    }
}

impl AssetSource for DirSource {
    fn locate(&self, asset: &str) -> String {
        self.path_for(asset).display().to_string()
    }

    fn format_hint(&self) -> Option<&str> {
        Some(self.extension.as_str())
    }

    async fn fetch(&self, asset: &str) -> Result<Vec<u8>> {
        let path = self.path_for(asset);
        debug!(asset, path = %path.display(), "Reading asset");

        tokio::fs::read(&path)
            .await
            .map_err(|e| StampError::fetch_failed(asset, format!("{}: {}", path.display(), e)))
    }
}

/// A source chosen from a configured base: HTTP for URLs, otherwise a directory.
#[derive(Debug, Clone)]
pub enum AnySource {
    Http(HttpSource),
    Dir(DirSource),
}

impl AnySource {
    /// Selects the source kind from the shape of `base`.
    pub fn from_base(base: &str, extension: &str) -> Result<Self> {
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(AnySource::Http(HttpSource::new(base, extension)?))
        } else {
            Ok(AnySource::Dir(DirSource::new(base, extension)))
        }
    }
}

impl AssetSource for AnySource {
    fn locate(&self, asset: &str) -> String {
        match self {
            AnySource::Http(source) => source.locate(asset),
            AnySource::Dir(source) => source.locate(asset),
        }
    }

    fn format_hint(&self) -> Option<&str> {
        match self {
            AnySource::Http(source) => source.format_hint(),
            AnySource::Dir(source) => source.format_hint(),
        }
    }

    async fn fetch(&self, asset: &str) -> Result<Vec<u8>> {
        match self {
            AnySource::Http(source) => source.fetch(asset).await,
            AnySource::Dir(source) => source.fetch(asset).await,
        }
    }
}
