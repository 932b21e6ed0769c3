#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use mock_interview::daemon::{build_router, AppState};
use mock_interview::domains::transcript::ChatMessage;
use mock_interview::error::{InterviewError, Result};
use mock_interview::interfaces::providers::CompletionProvider;
use mock_interview::interfaces::voice::{
    Camera, CameraStream, CaptureConstraints, SpeechSynthesizer, Utterance,
};

/// Replies from a queue and records every transcript it was handed.
pub struct QueueProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl QueueProvider {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }
}

#[async_trait]
impl CompletionProvider for QueueProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().await.push(messages.to_vec());
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(InterviewError::Http("quota exhausted".to_string())))
    }
}

pub struct SilentSynthesizer {
    pub delay: Duration,
    pub spoken: Mutex<Vec<String>>,
}

impl SilentSynthesizer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            spoken: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&self, utterance: &Utterance) -> Result<()> {
        self.spoken.lock().await.push(utterance.text.clone());
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

pub struct FixedCamera;

#[async_trait]
impl Camera for FixedCamera {
    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<CameraStream> {
        Ok(CameraStream {
            device: "front".to_string(),
            width: constraints.ideal_width,
            height: constraints.ideal_height,
        })
    }
}

pub struct DenyingCamera;

#[async_trait]
impl Camera for DenyingCamera {
    async fn acquire(&self, _constraints: &CaptureConstraints) -> Result<CameraStream> {
        Err(InterviewError::Runtime("NotAllowedError".to_string()))
    }
}

pub fn completion_body(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "openrouter/free",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

/// Serve the proxy router on an ephemeral port and return its base URL.
pub async fn spawn_proxy(provider: Arc<dyn CompletionProvider>) -> (String, AppState) {
    let state = AppState::new(provider, "You are Alex.");
    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}
