//! HTTP chatbot client

use super::config::{ChatbotConfig, ConfigError};
use super::{ChatbotError, ChatbotRequest, ChatbotResponse, ChatbotService};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;

/// Posts JSON to the chatbot endpoint with an API key header
pub struct HttpChatbotService {
    client: Client,
    url: String,
    api_key: Option<(HeaderName, HeaderValue)>,
}

impl HttpChatbotService {
    pub fn new(url: impl Into<String>, config: &ChatbotConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let api_key = match &config.api_key {
            Some(key) => {
                let name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(
                    |_| ConfigError::InvalidValue {
                        name: "CHATBOT_API_KEY_HEADER",
                        value: config.api_key_header.clone(),
                    },
                )?;
                let mut value =
                    HeaderValue::from_str(key).map_err(|_| ConfigError::InvalidValue {
                        name: "CHATBOT_API_KEY",
                        value: "<redacted>".to_string(),
                    })?;
                value.set_sensitive(true);
                Some((name, value))
            }
            None => None,
        };

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatbotService for HttpChatbotService {
    async fn send(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError> {
        let mut builder = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some((name, value)) = &self.api_key {
            builder = builder.header(name.clone(), value.clone());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ChatbotError::timeout(format!("Request timeout: {e}"))
            } else {
                ChatbotError::network(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ChatbotError::timeout(format!("Response timeout: {e}"))
            } else {
                ChatbotError::network(format!("Failed to read response: {e}"))
            }
        })?;

        if !status.is_success() {
            return Err(ChatbotError::status(status, &body));
        }

        ChatbotResponse::parse(&body)
    }
}
