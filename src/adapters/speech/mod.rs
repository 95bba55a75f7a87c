//! Speech adapters for narration of policy text.

mod recording;

pub use recording::{PlaybackState, RecordingSpeech};
