//! Audio output module.
//!
//! Provides WAV encoding and playback for stitched audio.

pub mod playback;
pub mod wav;

// Re-export commonly used items
pub use playback::{play, play_blocking};
pub use wav::{encode_wav, float_to_i16, write_wav, HEADER_LEN};
