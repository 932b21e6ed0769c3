use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};

use crate::config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REFERER};
use crate::domains::transcript::{ChatMessage, Role};
use crate::error::{InterviewError, Result};
use crate::interfaces::providers::CompletionProvider;

/// Chat-completion client for OpenAI-compatible endpoints (OpenRouter by default).
#[derive(Clone)]
pub struct OpenAiProvider {
    model: String,
    api_key: String,
    base_url: String,
    referer: String,
    http: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            referer: DEFAULT_REFERER.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut provider = Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.model.clone(),
            config.base_url.clone(),
        );
        if let Some(referer) = &config.referer {
            provider.referer = referer.clone();
        }
        provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        let content = message.content.as_str();
        let built = match message.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::System),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Text(
                    content.to_string(),
                ))
                .build()
                .map(ChatCompletionRequestMessage::User),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::Assistant),
        };
        built.map_err(|e| InterviewError::Runtime(e.to_string()))
    }

    fn build_request(&self, messages: &[ChatMessage]) -> Result<CreateChatCompletionRequest> {
        let messages = messages
            .iter()
            .map(Self::build_message)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(self.model.clone());
        builder.messages(messages);
        builder
            .build()
            .map_err(|e| InterviewError::Runtime(e.to_string()))
    }

    async fn raw_chat_completion(&self, request: &CreateChatCompletionRequest) -> Result<Value> {
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .json(request)
            .send()
            .await
            .map_err(|e| InterviewError::Http(format!("Chat completion transport failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InterviewError::Http(format!("Chat completion read failed: {e}")))?;

        if status != StatusCode::OK {
            return Err(InterviewError::Http(format!(
                "Chat completion failed ({status}): {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            InterviewError::Serialization(format!("Chat completion decode failed: {e}"))
        })
    }

    fn extract_text_from_value(response: &Value) -> Option<String> {
        response
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|text| text.to_string())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = self.build_request(messages)?;
        tracing::debug!(
            model = %self.model,
            turns = messages.len(),
            "Submitting transcript for completion"
        );
        let raw = self.raw_chat_completion(&request).await?;
        Self::extract_text_from_value(&raw)
            .ok_or_else(|| InterviewError::Runtime("Empty chat response".to_string()))
    }
}
