//! Wire types for the chatbot endpoint

use super::ChatbotError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body sent to the chatbot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotRequest {
    pub input: String,
    pub chatbot_name: String,
    pub username: String,
    /// Always `None`; turns are not linked into a conversation
    pub conversation_id: Option<String>,
}

impl ChatbotRequest {
    pub fn new(
        input: impl Into<String>,
        chatbot_name: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            chatbot_name: chatbot_name.into(),
            username: username.into(),
            conversation_id: None,
        }
    }
}

/// Validated chatbot reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatbotResponse {
    pub output: String,
}

impl ChatbotResponse {
    #[allow(dead_code)] // Used by mock chatbots
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }

    /// Parse a response body. Anything other than an object with a string
    /// `output` is rejected; extra fields are ignored.
    pub fn parse(body: &str) -> Result<Self, ChatbotError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ChatbotError::invalid_response(format!("Malformed response: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| ChatbotError::invalid_response("Response is not a JSON object"))?;
        let output = object
            .get("output")
            .and_then(Value::as_str)
            .ok_or_else(|| ChatbotError::invalid_response("Response has no string `output`"))?;
        Ok(Self {
            output: output.to_string(),
        })
    }
}
