//! Recording speech adapter - an in-process narration state machine.
//!
//! Real synthesis lives in the presentation layer (browser or OS voices);
//! this adapter models the playback contract and records what was narrated
//! so the lifecycle can be exercised in tests and headless environments.

use crate::ports::{SpeechError, SpeechOutput};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Playback lifecycle of a narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

#[derive(Debug)]
struct Playback {
    state: PlaybackState,
    /// Text of the most recent `play` call.
    last_text: Option<String>,
}

/// Speech output that records narration instead of synthesizing audio.
#[derive(Debug, Clone)]
pub struct RecordingSpeech {
    playback: Arc<Mutex<Playback>>,
}

impl Default for RecordingSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self {
            playback: Arc::new(Mutex::new(Playback {
                state: PlaybackState::Idle,
                last_text: None,
            })),
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.playback.lock().expect("playback lock poisoned").state
    }

    /// Text of the most recent narration, if any.
    pub fn last_text(&self) -> Option<String> {
        self.playback
            .lock()
            .expect("playback lock poisoned")
            .last_text
            .clone()
    }
}

#[async_trait]
impl SpeechOutput for RecordingSpeech {
    async fn play(&self, plain_text: &str) -> Result<(), SpeechError> {
        if plain_text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let mut playback = self.playback.lock().expect("playback lock poisoned");
        playback.state = PlaybackState::Playing;
        playback.last_text = Some(plain_text.to_string());
        Ok(())
    }

    async fn pause(&self) -> Result<(), SpeechError> {
        let mut playback = self.playback.lock().expect("playback lock poisoned");
        if playback.state == PlaybackState::Playing {
            playback.state = PlaybackState::Paused;
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        let mut playback = self.playback.lock().expect("playback lock poisoned");
        playback.state = PlaybackState::Idle;
        playback.last_text = None;
        Ok(())
    }
}
