//! timestamp-voice: assembles a spoken timestamp from recorded snippets.
//!
//! A timestamp such as "7:05 pm on Tuesday, November 22nd" is spoken by
//! concatenating nine short recordings in a fixed order: a prefix, the hour,
//! the minute, am/pm, "on", the weekday, the month, the day of the month and
//! a suffix. The stitched clip can be played or exported as a 16-bit WAV.
//!
//! # Modules
//!
//! - [`types`]: Timestamp fields, resolved parts and PCM buffers
//! - [`assets`]: Snippet sources (HTTP, directory) and decoding
//! - [`assembly`]: Concurrent fetch, stitching and the [`Assembler`]
//! - [`audio`]: WAV encoding and playback
//! - [`cache`]: Memoization of stitched clips
//! - [`config`]: Runtime configuration (StampConfig, ChannelPolicy)
//! - [`error`]: Error types and codes (StampError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use timestamp_voice::{AnySource, Assembler, Meridiem, StampConfig, TimestampParts};
//!
//! let config = StampConfig::from_env();
//! let source = AnySource::from_base(&config.asset_base, &config.asset_extension)?;
//! let mut assembler = Assembler::new(source, config);
//!
//! let parts = TimestampParts::new(7, 5, Meridiem::Pm, 3, 11, 22)?;
//! assembler.export(&parts, "timestamp.wav".as_ref()).await?;
//! ```

pub mod assembly;
pub mod assets;
pub mod audio;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use assembly::Assembler;
pub use assets::{AnySource, AssetSource, DirSource, HttpSource};
pub use config::{ChannelPolicy, StampConfig};
pub use error::{ErrorCode, Result, StampError};
pub use types::{Field, Meridiem, PcmBuffer, Resolved, TimestampInput, TimestampParts};
