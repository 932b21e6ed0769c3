use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{InterviewError, Result};
use crate::prompts::INTERVIEWER_SYSTEM_PROMPT;

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openrouter/free";
pub const DEFAULT_REFERER: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub referer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub system_prompt: Option<String>,
}

impl Config {
    pub fn convention_defaults() -> Self {
        Self {
            provider: ProviderConfig {
                api_key: None,
                model: Some(DEFAULT_MODEL.to_string()),
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                referer: Some(DEFAULT_REFERER.to_string()),
            },
            server: ServerConfig::default(),
            system_prompt: None,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            InterviewError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Config =
            serde_json::from_str(&raw).map_err(|e| InterviewError::Config(e.to_string()))?;
        Ok(config.fill_defaults())
    }

    /// Keys the file left out fall back to the conventions.
    fn fill_defaults(mut self) -> Self {
        let defaults = Self::convention_defaults().provider;
        if self.provider.model.is_none() {
            self.provider.model = defaults.model;
        }
        if self.provider.base_url.is_none() {
            self.provider.base_url = defaults.base_url;
        }
        if self.provider.referer.is_none() {
            self.provider.referer = defaults.referer;
        }
        self
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.provider.api_key = Some(key);
            }
        }
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(INTERVIEWER_SYSTEM_PROMPT)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
