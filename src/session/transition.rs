//! Pure state transition function
//!
//! Given the same status, context and event, `transition` always yields the
//! same new status and effects. It performs no I/O.

use super::{Effect, Event, SessionContext, SessionStatus};
use crate::chatbot::ChatbotRequest;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionStatus,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionStatus) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A response is still pending, wait for it before sending another message")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(
    state: &SessionStatus,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Blank input is ignored in every state
        (_, Event::UserSubmit { text }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(*state))
        }

        // Idle + UserSubmit -> AwaitingResponse
        // The user entry lands before the request is issued.
        (SessionStatus::Idle, Event::UserSubmit { text }) => {
            let request = ChatbotRequest::new(
                text.clone(),
                context.chatbot_name.clone(),
                context.username.clone(),
            );
            Ok(TransitionResult::new(SessionStatus::AwaitingResponse)
                .with_effect(Effect::append_user(text))
                .with_effect(Effect::ClearDraft)
                .with_effect(Effect::notify_status(SessionStatus::AwaitingResponse))
                .with_effect(Effect::SendToChatbot { request }))
        }

        (SessionStatus::AwaitingResponse, Event::UserSubmit { .. }) => Err(TransitionError::Busy),

        // AwaitingResponse + BotReply -> Idle
        (SessionStatus::AwaitingResponse, Event::BotReply { output }) => {
            Ok(TransitionResult::new(SessionStatus::Idle)
                .with_effect(Effect::append_bot(output))
                .with_effect(Effect::notify_status(SessionStatus::Idle)))
        }

        // AwaitingResponse + BotFailure -> Idle, with the fallback text
        (SessionStatus::AwaitingResponse, Event::BotFailure { .. }) => {
            Ok(TransitionResult::new(SessionStatus::Idle)
                .with_effect(Effect::append_bot(context.fallback_message.clone()))
                .with_effect(Effect::notify_status(SessionStatus::Idle)))
        }

        (SessionStatus::Idle, event @ (Event::BotReply { .. } | Event::BotFailure { .. })) => {
            Err(TransitionError::InvalidTransition(format!(
                "{event:?} while idle"
            )))
        }
    }
}
