//! Chatbot client abstraction
//!
//! The remote chatbot is an opaque service: one JSON request in, one
//! `output` string back.

mod config;
mod error;
mod http;
mod types;

pub use config::{ChatbotConfig, ConfigError};
pub use error::{ChatbotError, ChatbotErrorKind};
pub use http::HttpChatbotService;
pub use types::{ChatbotRequest, ChatbotResponse};

use async_trait::async_trait;
use std::sync::Arc;

/// Capability to send one message to the chatbot
#[async_trait]
pub trait ChatbotService: Send + Sync {
    async fn send(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError>;
}

#[async_trait]
impl<T: ChatbotService + ?Sized> ChatbotService for Arc<T> {
    async fn send(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError> {
        (**self).send(request).await
    }
}

/// Stand-in used when no endpoint is configured. Every send fails.
pub struct UnconfiguredChatbot;

#[async_trait]
impl ChatbotService for UnconfiguredChatbot {
    async fn send(&self, _request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError> {
        Err(ChatbotError::not_configured("CHATBOT_URL is not set"))
    }
}

/// Logging wrapper for chatbot services
pub struct LoggingService {
    inner: Arc<dyn ChatbotService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn ChatbotService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ChatbotService for LoggingService {
    async fn send(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    chatbot = %request.chatbot_name,
                    duration_ms = %duration.as_millis(),
                    input_chars = request.input.chars().count(),
                    output_chars = response.output.chars().count(),
                    "Chatbot request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    chatbot = %request.chatbot_name,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    "Chatbot request failed"
                );
            }
        }

        result
    }
}

/// Build the production chatbot client for `config`, wrapped with logging
pub fn build_service(config: &ChatbotConfig) -> Result<Arc<dyn ChatbotService>, ConfigError> {
    let inner: Arc<dyn ChatbotService> = match &config.url {
        Some(url) => Arc::new(HttpChatbotService::new(url.clone(), config)?),
        None => Arc::new(UnconfiguredChatbot),
    };
    Ok(Arc::new(LoggingService::new(inner)))
}
