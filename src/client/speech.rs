use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use regex::Regex;
use tokio::task::JoinHandle;

use crate::interfaces::voice::{SpeechSynthesizer, Utterance};

/// Strip pictographs, private-use glyphs and markdown fences a synthesizer
/// would read out literally.
pub fn clean_for_speech(text: &str) -> String {
    static SYMBOLS_RE: OnceLock<Regex> = OnceLock::new();
    let re = SYMBOLS_RE.get_or_init(|| {
        Regex::new(
            r"[\x{2700}-\x{27BF}\x{E000}-\x{F8FF}\x{1F000}-\x{1F7FF}\x{2011}-\x{26FF}\x{1F910}-\x{1F9FF}]",
        )
        .expect("valid speech symbol regex")
    });
    re.replace_all(text, "")
        .replace("**", "")
        .replace("```", "")
}

#[derive(Debug, Default)]
struct PlaybackState {
    generation: u64,
    speaking: bool,
}

fn lock_state(state: &Mutex<PlaybackState>) -> MutexGuard<'_, PlaybackState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Read-only view of whether an utterance is being spoken.
#[derive(Clone, Default)]
pub struct PlaybackHandle(Arc<Mutex<PlaybackState>>);

impl PlaybackHandle {
    pub fn is_speaking(&self) -> bool {
        lock_state(&self.0).speaking
    }

    fn begin(&self) -> u64 {
        let mut state = lock_state(&self.0);
        state.generation += 1;
        state.speaking = false;
        state.generation
    }

    fn mark(&self, generation: u64, speaking: bool) {
        let mut state = lock_state(&self.0);
        if state.generation == generation {
            state.speaking = speaking;
        }
    }
}

/// Speaks one utterance at a time; every new utterance cancels the previous.
pub struct SpeechPlayer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    playback: PlaybackHandle,
    current: Option<JoinHandle<()>>,
}

impl SpeechPlayer {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            playback: PlaybackHandle::default(),
            current: None,
        }
    }

    pub fn handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn is_speaking(&self) -> bool {
        self.playback.is_speaking()
    }

    /// Stop the in-flight utterance, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
        self.playback.begin();
    }

    pub fn speak(&mut self, text: &str) -> Utterance {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
        let generation = self.playback.begin();
        let utterance = Utterance::new(clean_for_speech(text));

        let synthesizer = self.synthesizer.clone();
        let playback = self.playback.clone();
        let spoken = utterance.clone();
        self.current = Some(tokio::spawn(async move {
            playback.mark(generation, true);
            if let Err(err) = synthesizer.speak(&spoken).await {
                tracing::warn!("Speech synthesis failed: {}", err);
            }
            playback.mark(generation, false);
        }));
        utterance
    }

    /// Wait for the current utterance to end.
    pub async fn finished(&mut self) {
        if let Some(handle) = self.current.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for SpeechPlayer {
    fn drop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }
}
