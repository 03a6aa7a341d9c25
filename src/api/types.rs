//! API request and response types

use crate::calculator::{Calculation, DisplayResult};
use crate::session::{Message, SessionStatus};
use serde::{Deserialize, Serialize};

/// Request to run the calculator
#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub input: Option<String>,
}

/// Calculator state for display
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub input: Option<String>,
    pub calculation: Calculation,
    pub display: DisplayResult,
    pub has_result: bool,
}

impl CalculationResponse {
    pub fn new(input: Option<String>, calculation: Calculation) -> Self {
        let display = calculation.result().display();
        let has_result = calculation.has_result();
        Self {
            input,
            calculation,
            display,
            has_result,
        }
    }
}

/// Request to send a chat message. Without `text`, the draft is sent.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Request to replace the draft buffer
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

/// Outcome of a chat submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatOutcome {
    Ignored,
    Answered,
    Failed,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub outcome: ChatOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<Message>,
}

/// Full chat panel state
#[derive(Debug, Serialize)]
pub struct ChatStateResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub busy: bool,
    pub draft: String,
    pub messages: Vec<Message>,
}

/// Response for actions with no payload
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
