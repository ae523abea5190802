//! Core types for timestamp-voice.
//!
//! This module re-exports all the core data types used by the pipeline:
//! - [`Field`]: The nine fixed parts of a spoken timestamp
//! - [`TimestampParts`]: Validated field values mapped to asset identifiers
//! - [`TimestampInput`]: Partially specified input with wall-clock default fill
//! - [`PcmBuffer`] / [`DecodedAudio`]: Decoded audio per field

mod field;
mod parts;
mod pcm;

// Re-export all types at the module level
pub use field::Field;
pub use parts::{Meridiem, Resolved, TimestampInput, TimestampParts};
pub use pcm::{DecodedAudio, PcmBuffer};
