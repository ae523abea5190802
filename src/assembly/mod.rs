//! Timestamp assembly module.
//!
//! Provides the fetch, decode and stitch pipeline that turns
//! [`TimestampParts`](crate::types::TimestampParts) into one buffer.

pub mod fetch;
pub mod pipeline;
pub mod stitch;

// Re-export commonly used items
pub use fetch::fetch_and_decode;
pub use pipeline::Assembler;
pub use stitch::{concat_pair, stitch, stitch_decoded};
