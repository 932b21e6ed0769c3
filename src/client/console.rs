//! Terminal stand-ins for the voice and camera collaborators.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::error::{InterviewError, Result};
use crate::interfaces::voice::{
    Camera, CameraStream, CaptureConstraints, SpeechRecognizer, SpeechSynthesizer, Utterance,
};

/// Recognizer fed with already-transcribed lines.
pub struct ChannelRecognizer {
    rx: Mutex<mpsc::Receiver<String>>,
}

impl ChannelRecognizer {
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self { rx: Mutex::new(rx) }
    }
}

#[async_trait]
impl SpeechRecognizer for ChannelRecognizer {
    async fn recognize(&self) -> Result<String> {
        self.rx
            .lock()
            .await
            .recv()
            .await
            .map(|line| line.trim().to_string())
            .ok_or_else(|| InterviewError::Runtime("no-speech: input closed".to_string()))
    }
}

/// Prints each utterance and holds for roughly the time it takes to read it.
pub struct ConsoleSynthesizer {
    words_per_minute: u32,
}

impl Default for ConsoleSynthesizer {
    fn default() -> Self {
        Self {
            words_per_minute: 180,
        }
    }
}

impl ConsoleSynthesizer {
    pub fn new(words_per_minute: u32) -> Self {
        Self { words_per_minute }
    }

    pub fn reading_time(&self, text: &str) -> Duration {
        let words = text.split_whitespace().count() as u64;
        let wpm = u64::from(self.words_per_minute.max(1));
        Duration::from_millis(words * 60_000 / wpm)
    }
}

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, utterance: &Utterance) -> Result<()> {
        println!("Alex: {}", utterance.text);
        tokio::time::sleep(self.reading_time(&utterance.text)).await;
        Ok(())
    }
}

/// A terminal has no video device; acquisition always fails like a denied
/// permission prompt.
pub struct NoCamera;

#[async_trait]
impl Camera for NoCamera {
    async fn acquire(&self, _constraints: &CaptureConstraints) -> Result<CameraStream> {
        Err(InterviewError::Unsupported(
            "NotAllowedError: no camera device in a terminal session".to_string(),
        ))
    }
}
