//! Events that drive a chat session

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User submitted text from the input field
    UserSubmit { text: String },
    /// Chatbot answered with a valid `output`
    BotReply { output: String },
    /// Request failed or was abandoned. `reason` is for logs only.
    BotFailure { reason: String },
}
