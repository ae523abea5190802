//! Runtime configuration module.
//!
//! Contains the configuration for timestamp assembly, including where
//! snippets are fetched from, how long a fetch may take, the channel policy
//! used when stitching, and where exported clips are written.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default filename for exported clips.
pub const DEFAULT_OUTPUT_FILENAME: &str = "timestamp.wav";

/// Accepted log level names.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// What to do when two snippets being joined have different channel counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelPolicy {
    /// Keep only the channels both buffers have.
    /// A stereo snippet joined to a mono one loses its right channel.
    #[default]
    DropExtra,

    /// Refuse to join buffers whose channel counts differ.
    Strict,
}

impl ChannelPolicy {
    /// Returns the string representation of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelPolicy::DropExtra => "drop",
            ChannelPolicy::Strict => "strict",
        }
    }

    /// Parses a policy from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drop" | "drop-extra" | "min" => Some(ChannelPolicy::DropExtra),
            "strict" => Some(ChannelPolicy::Strict),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runtime configuration for assembling timestamps.
///
/// This configuration is typically loaded from environment variables at
/// startup and then overridden by command-line arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampConfig {
    /// Directory or HTTP(S) URL prefix holding the snippets.
    pub asset_base: String,

    /// File extension of every snippet, without the dot.
    pub asset_extension: String,

    /// Upper bound on a single snippet retrieval, in milliseconds.
    pub fetch_timeout_ms: u64,

    /// Channel policy for stitching.
    pub channel_policy: ChannelPolicy,

    /// Number of stitched clips kept in memory.
    pub cache_entries: usize,

    /// Path for exported clips.
    /// If None, uses `timestamp.wav` in the platform download directory.
    pub output_path: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
}

impl StampConfig {
    /// Creates a new StampConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a StampConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `TSVOICE_ASSET_BASE` - Snippet directory or URL prefix
    /// - `TSVOICE_ASSET_EXT` - Snippet file extension
    /// - `TSVOICE_FETCH_TIMEOUT_MS` - Per-snippet fetch timeout
    /// - `TSVOICE_CHANNEL_POLICY` - Channel policy (drop, strict)
    /// - `TSVOICE_CACHE_ENTRIES` - Stitched clips kept in memory
    /// - `TSVOICE_OUTPUT_PATH` - Export path
    /// - `TSVOICE_LOG_LEVEL` - Default log level
    ///
    /// Falls back to defaults for unset or invalid variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("TSVOICE_ASSET_BASE") {
            if !base.trim().is_empty() {
                config.asset_base = base;
            }
        }

        if let Ok(ext) = std::env::var("TSVOICE_ASSET_EXT") {
            let ext = ext.trim().trim_start_matches('.').to_string();
            if !ext.is_empty() {
                config.asset_extension = ext;
            }
        }

        if let Ok(timeout_str) = std::env::var("TSVOICE_FETCH_TIMEOUT_MS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                if timeout > 0 {
                    config.fetch_timeout_ms = timeout;
                }
            }
        }

        if let Ok(policy_str) = std::env::var("TSVOICE_CHANNEL_POLICY") {
            if let Some(policy) = ChannelPolicy::parse(&policy_str) {
                config.channel_policy = policy;
            }
        }

        if let Ok(entries_str) = std::env::var("TSVOICE_CACHE_ENTRIES") {
            if let Ok(entries) = entries_str.parse::<usize>() {
                if entries > 0 {
                    config.cache_entries = entries;
                }
            }
        }

        if let Ok(path) = std::env::var("TSVOICE_OUTPUT_PATH") {
            config.output_path = Some(PathBuf::from(path));
        }

        if let Ok(level) = std::env::var("TSVOICE_LOG_LEVEL") {
            let level = level.to_lowercase();
            if LOG_LEVELS.contains(&level.as_str()) {
                config.log_level = level;
            }
        }

        config
    }

    /// Per-snippet fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Returns the effective export path, using platform defaults if not specified.
    pub fn effective_output_path(&self) -> PathBuf {
        if let Some(ref path) = self.output_path {
            path.clone()
        } else {
            default_output_path()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.asset_base.trim().is_empty() {
            return Some("asset base must not be empty".to_string());
        }

        if self.asset_extension.is_empty() {
            return Some("asset extension must not be empty".to_string());
        }

        if self.fetch_timeout_ms == 0 {
            return Some("fetch timeout must be > 0".to_string());
        }

        if self.cache_entries == 0 {
            return Some("cache must hold at least one entry".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Some(format!(
                "log level '{}' must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        None
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            asset_base: "resources".to_string(),
            asset_extension: "mp3".to_string(),
            fetch_timeout_ms: 10_000,
            channel_policy: ChannelPolicy::default(),
            cache_entries: 8,
            output_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// Returns the platform-specific default export path.
///
/// Uses the `directories` crate to find the user's download directory:
/// - macOS: ~/Downloads/timestamp.wav
/// - Linux: $XDG_DOWNLOAD_DIR/timestamp.wav
/// - Windows: C:\Users\<user>\Downloads\timestamp.wav
fn default_output_path() -> PathBuf {
    if let Some(dir) = directories::UserDirs::new()
        .as_ref()
        .and_then(|dirs| dirs.download_dir())
    {
        dir.join(DEFAULT_OUTPUT_FILENAME)
    } else {
        // Fallback to current directory
        PathBuf::from(DEFAULT_OUTPUT_FILENAME)
    }
}
