//! Mock implementations for testing
//!
//! These mocks enable session tests without real I/O.

use super::ChatSession;
use crate::chatbot::{ChatbotError, ChatbotRequest, ChatbotResponse, ChatbotService};
use crate::session::SessionContext;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const TEST_FALLBACK: &str = "Sorry, something went wrong.";

pub fn test_context() -> SessionContext {
    SessionContext::new("test-bot", "test-user", TEST_FALLBACK)
}

pub fn test_session<C: ChatbotService>(chatbot: C) -> ChatSession<C> {
    ChatSession::new(test_context(), chatbot)
}

// ============================================================================
// Mock Chatbot
// ============================================================================

/// Mock chatbot that returns queued responses
#[derive(Default)]
pub struct MockChatbot {
    responses: Mutex<VecDeque<Result<ChatbotResponse, ChatbotError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatbotRequest>>,
}

impl MockChatbot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn queue_response(&self, output: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ChatbotResponse::new(output)));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: ChatbotError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<ChatbotRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatbotService for MockChatbot {
    async fn send(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatbotError::network("No mock response queued")))
    }
}

// ============================================================================
// Gated Mock Chatbot (for in-flight testing)
// ============================================================================

/// Mock chatbot that holds each request until released
#[derive(Default)]
pub struct GatedMockChatbot {
    pub inner: MockChatbot,
    /// Notified when a request reaches the chatbot
    pub request_started: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedMockChatbot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one pending (or the next) request complete
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ChatbotService for GatedMockChatbot {
    async fn send(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ChatbotError> {
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chatbot() {
        let mock = MockChatbot::new();
        mock.queue_response("Hello");

        let request = ChatbotRequest::new("hi", "bot", "user");
        let response = mock.send(&request).await.unwrap();
        assert_eq!(response.output, "Hello");

        // Second call should fail (no more responses)
        assert!(mock.send(&request).await.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_gated_mock_waits_for_release() {
        let mock = Arc::new(GatedMockChatbot::new());
        mock.inner.queue_response("later");

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.send(&ChatbotRequest::new("hi", "b", "u")).await })
        };

        mock.request_started.notified().await;
        assert!(!task.is_finished());
        mock.release();

        let response = task.await.unwrap().unwrap();
        assert_eq!(response.output, "later");
    }
}
