//! Effects produced by state transitions

use super::state::{Sender, SessionStatus};
use crate::chatbot::ChatbotRequest;

/// Effects to be executed, in order, after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage { text: String, sender: Sender },

    /// Clear the pending input buffer
    ClearDraft,

    /// Tell observers the status changed
    NotifyStatus { status: SessionStatus },

    /// Send one request to the chatbot
    SendToChatbot { request: ChatbotRequest },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    pub fn notify_status(status: SessionStatus) -> Self {
        Effect::NotifyStatus { status }
    }
}
