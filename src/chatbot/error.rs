//! Chatbot error types

use std::fmt::Display;
use thiserror::Error;

/// Upstream error bodies are cut to this many characters
const MAX_STATUS_BODY_CHARS: usize = 512;

/// Failure of one chatbot exchange
///
/// Callers never branch on the kind; it exists for diagnostics.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ChatbotError {
    pub kind: ChatbotErrorKind,
    pub message: String,
}

impl ChatbotError {
    pub fn new(kind: ChatbotErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ChatbotErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ChatbotErrorKind::Timeout, message)
    }

    /// Non-2xx reply. Long bodies are truncated before they reach the logs.
    pub fn status(status: impl Display, body: &str) -> Self {
        let mut chars = body.chars();
        let mut excerpt: String = chars.by_ref().take(MAX_STATUS_BODY_CHARS).collect();
        if chars.next().is_some() {
            excerpt.push_str("...");
        }
        Self::new(ChatbotErrorKind::Status, format!("HTTP {status}: {excerpt}"))
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ChatbotErrorKind::InvalidResponse, message)
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(ChatbotErrorKind::NotConfigured, message)
    }
}

/// Error classification for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatbotErrorKind {
    /// Connection refused, reset, DNS failure
    Network,
    /// Request exceeded the configured timeout
    Timeout,
    /// Non-2xx status from the chatbot
    Status,
    /// Body was not JSON or lacked a string `output`
    InvalidResponse,
    /// No endpoint configured
    NotConfigured,
}

impl ChatbotErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::InvalidResponse => "invalid_response",
            Self::NotConfigured => "not_configured",
        }
    }
}

impl std::fmt::Display for ChatbotErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
