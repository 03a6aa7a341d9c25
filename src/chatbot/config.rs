//! Chatbot configuration

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";
pub const DEFAULT_CHATBOT_NAME: &str = "odorant-assistant";
pub const DEFAULT_USERNAME: &str = "guest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// Configuration errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Settings for the outbound chatbot call and the session identity
#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    /// Endpoint URL. `None` leaves chat unconfigured.
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_header: String,
    pub chatbot_name: String,
    pub username: String,
    pub timeout: Duration,
    pub fallback_message: String,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            chatbot_name: DEFAULT_CHATBOT_NAME.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl ChatbotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("CHATBOT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "CHATBOT_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => defaults.timeout,
        };

        Ok(Self {
            url: get("CHATBOT_URL"),
            api_key: get("CHATBOT_API_KEY"),
            api_key_header: get("CHATBOT_API_KEY_HEADER").unwrap_or(defaults.api_key_header),
            chatbot_name: get("CHATBOT_NAME").unwrap_or(defaults.chatbot_name),
            username: get("CHATBOT_USERNAME").unwrap_or(defaults.username),
            timeout,
            fallback_message: get("CHATBOT_FALLBACK_MESSAGE")
                .unwrap_or(defaults.fallback_message),
        })
    }
}
