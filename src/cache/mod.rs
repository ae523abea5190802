//! Cache module for stitched clips.
//!
//! Provides LRU-based memoization of stitched buffers.

pub mod stitched;

// Re-export commonly used types
pub use stitched::StitchCache;
