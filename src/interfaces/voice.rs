use async_trait::async_trait;

use crate::error::Result;

/// Text handed to a synthesizer, already cleaned for speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing_mode: String,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1920,
            ideal_height: 1080,
            facing_mode: "user".to_string(),
        }
    }
}

/// Handle to an acquired video source. Held until the camera is toggled off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraStream {
    pub device: String,
    pub width: u32,
    pub height: u32,
}

/// One-shot speech capture. Resolving is the "result" event, an error the
/// "error" event.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self) -> Result<String>;
}

/// Speaks one utterance; the future completing is the "end" event.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, utterance: &Utterance) -> Result<()>;
}

#[async_trait]
pub trait Camera: Send + Sync {
    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<CameraStream>;
}
