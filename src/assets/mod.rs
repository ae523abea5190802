//! Asset retrieval and decoding.
//!
//! Snippets are fetched by identifier from an [`AssetSource`] and decoded
//! from their compressed form to PCM with symphonia.

pub mod decode;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use decode::decode_audio;
pub use source::{AnySource, AssetSource, DirSource, HttpSource};
