//! Error types for timestamp-voice.
//!
//! Defines the error codes and the error type used throughout the assembly
//! pipeline for consistent error handling and reporting.

use std::fmt;
use std::time::Duration;

use crate::types::Field;

/// Error codes attached to every [`StampError`].
///
/// These codes allow callers to programmatically handle specific failure
/// conditions without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// An asset could not be retrieved.
    /// Trigger: Non-2xx HTTP response, network error, or missing file.
    AssetFetchFailed,

    /// An asset retrieval did not complete in time.
    /// Trigger: Stalled connection or unresponsive asset host.
    FetchTimeout,

    /// A retrieved payload could not be decoded to PCM.
    /// Trigger: Corrupt file, unsupported container or codec.
    DecodeFailed,

    /// Not every field produced a decoded buffer.
    /// Trigger: Stitching attempted with a missing field.
    IncompleteAssembly,

    /// Buffers with different channel counts under the strict channel policy.
    /// Trigger: A mono snippet mixed with stereo snippets.
    ChannelMismatch,

    /// A timestamp field is outside its valid range.
    /// Trigger: Hour 13, minute 60, month 0, etc.
    InvalidField,

    /// The stitched buffer could not be encoded as WAV.
    /// Trigger: More than two channels or an oversized data chunk.
    EncodeFailed,

    /// The encoded WAV file could not be written.
    /// Trigger: Missing directory, permissions, disk full.
    ExportFailed,

    /// The audio output failed during playback.
    /// Trigger: No output device or device error.
    PlaybackFailed,

    /// Playback support was not compiled in.
    /// Trigger: Binary built without the `playback` feature.
    PlaybackUnavailable,

    /// Configuration is invalid.
    /// Trigger: Zero timeout, zero cache capacity, empty extension.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AssetFetchFailed => "ASSET_FETCH_FAILED",
            ErrorCode::FetchTimeout => "FETCH_TIMEOUT",
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::IncompleteAssembly => "INCOMPLETE_ASSEMBLY",
            ErrorCode::ChannelMismatch => "CHANNEL_MISMATCH",
            ErrorCode::InvalidField => "INVALID_FIELD",
            ErrorCode::EncodeFailed => "ENCODE_FAILED",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
            ErrorCode::PlaybackFailed => "PLAYBACK_FAILED",
            ErrorCode::PlaybackUnavailable => "PLAYBACK_UNAVAILABLE",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::AssetFetchFailed => "An audio snippet could not be retrieved",
            ErrorCode::FetchTimeout => "An audio snippet did not arrive in time",
            ErrorCode::DecodeFailed => "An audio snippet could not be decoded",
            ErrorCode::IncompleteAssembly => "Not every timestamp field has decoded audio",
            ErrorCode::ChannelMismatch => "Audio snippets have different channel counts",
            ErrorCode::InvalidField => "A timestamp field is out of range",
            ErrorCode::EncodeFailed => "The stitched audio could not be encoded as WAV",
            ErrorCode::ExportFailed => "The WAV file could not be written",
            ErrorCode::PlaybackFailed => "The stitched audio could not be played",
            ErrorCode::PlaybackUnavailable => "This build has no audio playback support",
            ErrorCode::InvalidConfig => "The configuration is invalid",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::AssetFetchFailed => {
                "Check that the asset base (--assets or TSVOICE_ASSET_BASE) points at the \
                 snippet directory or URL and that the named file exists"
            }
            ErrorCode::FetchTimeout => {
                "Check connectivity to the asset host, or raise the limit with \
                 --timeout-ms or TSVOICE_FETCH_TIMEOUT_MS"
            }
            ErrorCode::DecodeFailed => {
                "Verify the snippet is a valid audio file and that --ext matches its format"
            }
            ErrorCode::IncompleteAssembly => {
                "Retry the request; every field must resolve before stitching"
            }
            ErrorCode::ChannelMismatch => {
                "Re-record the snippets with a common channel count, or drop \
                 --strict-channels to keep only the shared channels"
            }
            ErrorCode::InvalidField => {
                "Use hour 1-12, minute 0-59, day 1-7, month 1-12 and date 1-31"
            }
            ErrorCode::EncodeFailed => "Use mono or stereo snippets",
            ErrorCode::ExportFailed => {
                "Check that the output directory exists and is writable"
            }
            ErrorCode::PlaybackFailed => {
                "Check that an audio output device is available, or export with --output"
            }
            ErrorCode::PlaybackUnavailable => {
                "Rebuild with `--features playback`, or export with --output"
            }
            ErrorCode::InvalidConfig => "Fix the reported setting and try again",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for assembly operations.
#[derive(Debug)]
pub struct StampError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Identifier of the asset involved, when the failure concerns one.
    pub asset: Option<String>,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StampError {
    /// Creates a new StampError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            asset: None,
            source: None,
        }
    }

    /// Creates a new StampError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            asset: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attaches the identifier of the asset this error concerns.
    pub fn for_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Prefixes the message with the timestamp field the failure belongs to.
    pub fn in_field(self, field: Field) -> Self {
        Self {
            message: format!("Field {}: {}", field, self.message),
            ..self
        }
    }

    /// Creates an ASSET_FETCH_FAILED error.
    pub fn fetch_failed(asset: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::AssetFetchFailed,
            format!("Failed to fetch asset '{}': {}", asset, reason.into()),
        )
        .for_asset(asset)
    }

    /// Creates a FETCH_TIMEOUT error.
    pub fn fetch_timeout(field: Field, asset: &str, limit: Duration) -> Self {
        Self::new(
            ErrorCode::FetchTimeout,
            format!(
                "Asset '{}' for field {} did not arrive within {} ms",
                asset,
                field,
                limit.as_millis()
            ),
        )
        .for_asset(asset)
    }

    /// Creates a DECODE_FAILED error.
    pub fn decode_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DecodeFailed,
            format!("Failed to decode audio: {}", reason.into()),
        )
    }

    /// Creates an INCOMPLETE_ASSEMBLY error for a field with no decoded audio.
    pub fn missing_field(field: Field) -> Self {
        Self::new(
            ErrorCode::IncompleteAssembly,
            format!("No decoded audio for field {}", field),
        )
    }

    /// Creates an INCOMPLETE_ASSEMBLY error for an empty buffer sequence.
    pub fn nothing_to_stitch() -> Self {
        Self::new(ErrorCode::IncompleteAssembly, "No buffers to stitch")
    }

    /// Creates a CHANNEL_MISMATCH error.
    pub fn channel_mismatch(left: usize, right: usize) -> Self {
        Self::new(
            ErrorCode::ChannelMismatch,
            format!(
                "Cannot join a {}-channel buffer with a {}-channel buffer",
                left, right
            ),
        )
    }

    /// Creates an INVALID_FIELD error.
    pub fn invalid_field(field: Field, value: u32, min: u32, max: u32) -> Self {
        Self::new(
            ErrorCode::InvalidField,
            format!(
                "Invalid {}: {} (must be between {} and {})",
                field, value, min, max
            ),
        )
    }

    /// Creates an ENCODE_FAILED error.
    pub fn encode_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::EncodeFailed,
            format!("Failed to encode WAV: {}", reason.into()),
        )
    }

    /// Creates an EXPORT_FAILED error.
    pub fn export_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExportFailed,
            format!("Failed to export WAV: {}", reason.into()),
        )
    }

    /// Creates a PLAYBACK_FAILED error.
    pub fn playback_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::PlaybackFailed,
            format!("Playback failed: {}", reason.into()),
        )
    }

    /// Creates a PLAYBACK_UNAVAILABLE error.
    pub fn playback_unavailable() -> Self {
        Self::new(
            ErrorCode::PlaybackUnavailable,
            "Playback support is not compiled into this build",
        )
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidConfig,
            format!("Invalid configuration: {}", reason.into()),
        )
    }
}

impl fmt::Display for StampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for StampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using StampError.
pub type Result<T> = std::result::Result<T, StampError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::AssetFetchFailed.as_str(), "ASSET_FETCH_FAILED");
        assert_eq!(ErrorCode::FetchTimeout.as_str(), "FETCH_TIMEOUT");
        assert_eq!(ErrorCode::DecodeFailed.as_str(), "DECODE_FAILED");
        assert_eq!(ErrorCode::IncompleteAssembly.as_str(), "INCOMPLETE_ASSEMBLY");
        assert_eq!(ErrorCode::ChannelMismatch.as_str(), "CHANNEL_MISMATCH");
        assert_eq!(ErrorCode::InvalidField.as_str(), "INVALID_FIELD");
        assert_eq!(ErrorCode::PlaybackUnavailable.as_str(), "PLAYBACK_UNAVAILABLE");
    }

    #[test]
    fn error_code_recovery_hints_not_empty() {
        let codes = [
            ErrorCode::AssetFetchFailed,
            ErrorCode::FetchTimeout,
            ErrorCode::DecodeFailed,
            ErrorCode::IncompleteAssembly,
            ErrorCode::ChannelMismatch,
            ErrorCode::InvalidField,
            ErrorCode::EncodeFailed,
            ErrorCode::ExportFailed,
            ErrorCode::PlaybackFailed,
            ErrorCode::PlaybackUnavailable,
            ErrorCode::InvalidConfig,
        ];
        for code in codes {
            assert!(!code.recovery_hint().is_empty(), "{} has no hint", code);
            assert!(!code.description().is_empty(), "{} has no description", code);
        }
    }

    #[test]
    fn in_field_prefixes_message() {
        let err = StampError::fetch_failed("day_3", "HTTP 404").in_field(Field::Day);
        assert!(err.message.starts_with("Field day: Failed to fetch asset 'day_3'"));
        assert_eq!(err.code, ErrorCode::AssetFetchFailed);
        assert_eq!(err.asset.as_deref(), Some("day_3"));
    }

    #[test]
    fn fetch_failed_names_asset() {
        let err = StampError::fetch_failed("hour_7", "HTTP 404");
        assert_eq!(err.asset.as_deref(), Some("hour_7"));
        assert!(err.to_string().contains("ASSET_FETCH_FAILED"));
        assert!(err.to_string().contains("hour_7"));
        assert!(err.to_string().contains("Recovery:"));
    }

    #[test]
    fn timeout_message_includes_limit() {
        let err = StampError::fetch_timeout(Field::Minute, "minute_5", Duration::from_millis(250));
        assert_eq!(err.code, ErrorCode::FetchTimeout);
        assert!(err.message.contains("250 ms"));
        assert!(err.message.contains("minute"));
    }
}
