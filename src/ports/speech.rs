//! Speech output port - audible narration of plain policy text.
//!
//! Intentionally minimal: play, pause, stop. No voices, no content
//! negotiation; the caller is responsible for handing over de-markuped
//! plain text.

use async_trait::async_trait;
use thiserror::Error;

/// Port for the speech synthesis collaborator.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Starts narrating the given plain text, replacing any current
    /// playback.
    async fn play(&self, plain_text: &str) -> Result<(), SpeechError>;

    /// Pauses current playback, if any.
    async fn pause(&self) -> Result<(), SpeechError>;

    /// Stops and discards current playback, if any.
    async fn stop(&self) -> Result<(), SpeechError>;
}

/// Errors from speech synthesis.
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    /// Synthesis backend is not available on this platform.
    #[error("speech synthesis unavailable: {0}")]
    Unavailable(String),

    /// There is nothing to narrate.
    #[error("nothing to narrate")]
    EmptyText,
}
