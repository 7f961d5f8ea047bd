// src/services/client.rs
use async_trait::async_trait;
use reqwest::Client;

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::message::{ChatRequest, ChatResponse, HealthStatus};

/// Transport to the chat backend. One call per user send; no retries.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError>;

    async fn health(&self) -> Result<HealthStatus, WidgetError> {
        Err(WidgetError::Transport("health check not supported".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: Client,
    chat_url: String,
    health_url: String,
}

impl HttpChatClient {
    pub fn new(config: &WidgetConfig) -> Result<Self, WidgetError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WidgetError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            chat_url: config.chat_url(),
            health_url: config.health_url(),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError> {
        // `.json` sets `Content-Type: application/json`
        let resp = self.http.post(&self.chat_url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WidgetError::HttpStatus(status.as_u16()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn health(&self) -> Result<HealthStatus, WidgetError> {
        let resp = self.http.get(&self.health_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WidgetError::HttpStatus(status.as_u16()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
