use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domains::transcript::{ChatMessage, Transcript};
use crate::error::Result;
use crate::interfaces::providers::CompletionProvider;

/// Owns the proxy's transcript and relays it to the completion provider.
///
/// The lock is held across the provider call, so exchanges never interleave.
pub struct ConversationService {
    provider: Arc<dyn CompletionProvider>,
    transcript: Mutex<Transcript>,
}

impl ConversationService {
    pub fn new(provider: Arc<dyn CompletionProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            transcript: Mutex::new(Transcript::new(system_prompt)),
        }
    }

    /// Append `message` as a user turn, complete the whole transcript and
    /// append the reply.
    ///
    /// On failure the user turn stays in the transcript and no assistant turn
    /// is added.
    pub async fn exchange(&self, message: &str) -> Result<String> {
        let mut transcript = self.transcript.lock().await;
        transcript.push_user(message);
        debug!(
            turns = transcript.len(),
            chars = message.len(),
            "Appended user turn"
        );

        let reply = self.provider.complete(transcript.messages()).await?;
        transcript.push_assistant(reply.clone());
        info!(turns = transcript.len(), "Exchange completed");
        Ok(reply)
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.messages().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.transcript.lock().await.len()
    }
}
