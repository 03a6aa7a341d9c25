//! Session state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a chatbot request is in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Ready for user input
    #[default]
    Idle,
    /// One request in flight; further submissions are rejected
    AwaitingResponse,
}

impl SessionStatus {
    pub fn is_busy(self) -> bool {
        matches!(self, SessionStatus::AwaitingResponse)
    }
}

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: String,
    text: String,
    sender: Sender,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    #[allow(dead_code)] // Rendered through Serialize
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Identity of one chat session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    /// Chatbot identifier sent with every request
    pub chatbot_name: String,
    /// User identifier sent with every request
    pub username: String,
    /// Bot text appended when a request fails
    pub fallback_message: String,
}

impl SessionContext {
    pub fn new(
        chatbot_name: impl Into<String>,
        username: impl Into<String>,
        fallback_message: impl Into<String>,
    ) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            chatbot_name: chatbot_name.into(),
            username: username.into(),
            fallback_message: fallback_message.into(),
        }
    }
}
