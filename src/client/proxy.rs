use serde::{Deserialize, Serialize};

use crate::error::{InterviewError, Result};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:5000";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

/// HTTP client for the proxy's `/chat` endpoint.
#[derive(Clone)]
pub struct ProxyClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn send(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|err| InterviewError::Http(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(InterviewError::Http(format!("HTTP {status}: {text}")));
        }
        response
            .json::<ChatResponse>()
            .await
            .map(|body| body.reply)
            .map_err(|err| InterviewError::Serialization(err.to_string()))
    }
}
