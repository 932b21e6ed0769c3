use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::client::history::{ClientHistory, Speaker};
use crate::client::proxy::ProxyClient;
use crate::client::speech::{PlaybackHandle, SpeechPlayer};
use crate::error::{InterviewError, Result};
use crate::interfaces::voice::{
    Camera, CameraStream, CaptureConstraints, SpeechRecognizer, SpeechSynthesizer,
};
use crate::prompts::{INTERVIEW_START_SIGNAL, PRIMING_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoPanel {
    Live(CameraStream),
    Placeholder,
}

/// Transient flags a renderer can poll while the session is busy.
#[derive(Clone)]
pub struct Indicators {
    listening: Arc<AtomicBool>,
    playback: PlaybackHandle,
}

impl Indicators {
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn is_speaking(&self) -> bool {
        self.playback.is_speaking()
    }
}

/// Client side of one interview: chat history, voice capture, camera and
/// spoken replies.
pub struct InterviewSession {
    proxy: ProxyClient,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    camera: Arc<dyn Camera>,
    constraints: CaptureConstraints,
    player: SpeechPlayer,
    history: ClientHistory,
    interface_open: bool,
    camera_on: bool,
    camera_stream: Option<CameraStream>,
    listening: Arc<AtomicBool>,
}

impl InterviewSession {
    pub fn new(
        proxy: ProxyClient,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        camera: Arc<dyn Camera>,
    ) -> Self {
        Self {
            proxy,
            recognizer: None,
            camera,
            constraints: CaptureConstraints::default(),
            player: SpeechPlayer::new(synthesizer),
            history: ClientHistory::seeded(),
            interface_open: false,
            camera_on: true,
            camera_stream: None,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn history(&self) -> &ClientHistory {
        &self.history
    }

    pub fn is_interface_open(&self) -> bool {
        self.interface_open
    }

    pub fn is_camera_on(&self) -> bool {
        self.camera_on
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn is_speaking(&self) -> bool {
        self.player.is_speaking()
    }

    pub fn indicators(&self) -> Indicators {
        Indicators {
            listening: self.listening.clone(),
            playback: self.player.handle(),
        }
    }

    pub fn video_panel(&self) -> VideoPanel {
        match &self.camera_stream {
            Some(stream) if self.interface_open && self.camera_on => {
                VideoPanel::Live(stream.clone())
            }
            _ => VideoPanel::Placeholder,
        }
    }

    /// Open the interface and ask the proxy for the opening question.
    pub async fn launch(&mut self) -> Result<Option<String>> {
        self.interface_open = true;
        self.sync_camera().await;
        self.submit(INTERVIEW_START_SIGNAL).await
    }

    /// Close the interface, silencing any reply still being spoken.
    pub fn close(&mut self) {
        self.interface_open = false;
        self.player.cancel();
        self.camera_stream = None;
    }

    pub async fn toggle_camera(&mut self) -> bool {
        self.camera_on = !self.camera_on;
        self.sync_camera().await;
        self.camera_on
    }

    /// Send one utterance and speak the reply.
    ///
    /// Empty text is ignored. The start signal is sent as the priming message
    /// and never shows up in the history.
    pub async fn submit(&mut self, text: &str) -> Result<Option<String>> {
        if text.is_empty() {
            return Ok(None);
        }
        let is_start = text == INTERVIEW_START_SIGNAL;
        if !is_start {
            self.history.push(Speaker::User, text);
        }
        let prompt = if is_start { PRIMING_MESSAGE } else { text };

        match self.proxy.send(prompt).await {
            Ok(reply) => {
                self.history.push(Speaker::Assistant, reply.clone());
                self.player.speak(&reply);
                Ok(Some(reply))
            }
            Err(err) => {
                error!("Backend error: {}", err);
                Err(err)
            }
        }
    }

    /// Capture one utterance from the recognizer and submit it.
    pub async fn capture_voice(&mut self) -> Result<Option<String>> {
        let Some(recognizer) = self.recognizer.clone() else {
            return Err(InterviewError::Unsupported(
                "Speech recognition is not supported".to_string(),
            ));
        };

        self.listening.store(true, Ordering::SeqCst);
        let result = recognizer.recognize().await;
        self.listening.store(false, Ordering::SeqCst);

        match result {
            Ok(transcript) => self.submit(&transcript).await,
            Err(err) => {
                warn!("Speech recognition failed: {}", err);
                Err(err)
            }
        }
    }

    /// Wait until the current reply has been spoken.
    pub async fn finish_speaking(&mut self) {
        self.player.finished().await;
    }

    async fn sync_camera(&mut self) {
        if !(self.interface_open && self.camera_on) {
            self.camera_stream = None;
            return;
        }
        if self.camera_stream.is_some() {
            return;
        }
        match self.camera.acquire(&self.constraints).await {
            Ok(stream) => {
                info!(device = %stream.device, "Camera acquired");
                self.camera_stream = Some(stream);
            }
            Err(err) => warn!("Camera denied: {}", err),
        }
    }
}
