//! Runtime for executing a chat session
//!
//! Owns the transcript, the draft buffer and the status, and performs the
//! effects produced by the session state machine.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::{ChatSession, SessionSnapshot, SubmitOutcome};

use crate::chatbot::ChatbotService;
use crate::session::{Message, SessionStatus};
use std::sync::Arc;

/// Type alias for the production session with a boxed chatbot client
pub type ProductionSession = ChatSession<Arc<dyn ChatbotService>>;

/// Events sent to session observers
#[derive(Debug, Clone)]
pub enum SessionNotification {
    MessageAppended { message: Message },
    StatusChanged { status: SessionStatus },
    DraftCleared,
}
