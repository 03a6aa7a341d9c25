//! Chat session executor

use super::SessionNotification;
use crate::chatbot::{ChatbotRequest, ChatbotService};
use crate::session::{
    transition, Effect, Event, Message, SessionContext, SessionStatus, TransitionError,
};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

const NOTIFICATION_CAPACITY: usize = 64;

/// Mutable session state, guarded by one lock
#[derive(Debug, Default)]
struct SessionInner {
    status: SessionStatus,
    transcript: Vec<Message>,
    draft: String,
}

/// Point-in-time copy of the session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub status: SessionStatus,
    pub draft: String,
    pub messages: Vec<Message>,
}

/// What a call to [`ChatSession::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text; nothing changed
    Ignored,
    /// The chatbot answered
    Answered { reply: Message },
    /// The request failed and the fallback reply was appended
    Failed { reply: Message },
}

/// Effects of one transition that the caller still has to act on
#[derive(Debug, Default)]
struct Applied {
    request: Option<ChatbotRequest>,
    appended: Vec<Message>,
}

/// One chat session: transcript, draft buffer and in-flight status.
///
/// Created at session start and discarded with it. The status check and
/// the user entry are applied under the same lock, so two submissions can
/// never both be in flight.
pub struct ChatSession<C>
where
    C: ChatbotService,
{
    context: SessionContext,
    chatbot: C,
    inner: Mutex<SessionInner>,
    broadcast_tx: broadcast::Sender<SessionNotification>,
}

impl<C> ChatSession<C>
where
    C: ChatbotService,
{
    pub fn new(context: SessionContext, chatbot: C) -> Self {
        let (broadcast_tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        tracing::info!(session_id = %context.session_id, "Chat session started");
        Self {
            context,
            chatbot,
            inner: Mutex::new(SessionInner::default()),
            broadcast_tx,
        }
    }

    #[allow(dead_code)] // API completeness
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[allow(dead_code)] // API completeness
    pub fn status(&self) -> SessionStatus {
        self.lock().status
    }

    #[allow(dead_code)] // API completeness
    pub fn transcript(&self) -> Vec<Message> {
        self.lock().transcript.clone()
    }

    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// Replace the pending input buffer
    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().draft = text.into();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            session_id: self.context.session_id.clone(),
            status: inner.status,
            draft: inner.draft.clone(),
            messages: inner.transcript.clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionNotification> {
        self.broadcast_tx.subscribe()
    }

    /// Submit whatever is in the draft buffer
    pub async fn submit_draft(&self) -> Result<SubmitOutcome, TransitionError> {
        let draft = self.draft();
        self.submit(&draft).await
    }

    /// Run one request/response cycle for `text`.
    ///
    /// Blank text is ignored. While a request is pending, returns
    /// [`TransitionError::Busy`] without touching any state. Chatbot
    /// failures never surface here; they become the fallback reply.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome, TransitionError> {
        let applied = self.dispatch(Event::UserSubmit {
            text: text.to_string(),
        })?;
        let Some(request) = applied.request else {
            return Ok(SubmitOutcome::Ignored);
        };

        tracing::info!(
            session_id = %self.context.session_id,
            chars = text.chars().count(),
            "User message submitted"
        );

        let in_flight = InFlight::new(self);
        let result = self.chatbot.send(&request).await;
        in_flight.disarm();

        let (event, failed) = match result {
            Ok(response) => (
                Event::BotReply {
                    output: response.output,
                },
                false,
            ),
            Err(e) => {
                tracing::warn!(
                    session_id = %self.context.session_id,
                    kind = %e.kind,
                    error = %e.message,
                    "Chatbot request failed, using fallback reply"
                );
                (Event::BotFailure { reason: e.message }, true)
            }
        };

        let reply = self
            .dispatch(event)?
            .appended
            .pop()
            .ok_or_else(|| TransitionError::InvalidTransition("no reply appended".to_string()))?;

        Ok(if failed {
            SubmitOutcome::Failed { reply }
        } else {
            SubmitOutcome::Answered { reply }
        })
    }

    /// Apply one event: transition, then run the synchronous effects in order
    fn dispatch(&self, event: Event) -> Result<Applied, TransitionError> {
        let mut inner = self.lock();
        let result = transition(&inner.status, &self.context, event)?;
        inner.status = result.new_state;

        let mut applied = Applied::default();
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { text, sender } => {
                    let message = Message::new(text, sender);
                    inner.transcript.push(message.clone());
                    self.notify(SessionNotification::MessageAppended {
                        message: message.clone(),
                    });
                    applied.appended.push(message);
                }
                Effect::ClearDraft => {
                    inner.draft.clear();
                    self.notify(SessionNotification::DraftCleared);
                }
                Effect::NotifyStatus { status } => {
                    tracing::debug!(session_id = %self.context.session_id, ?status, "Status changed");
                    self.notify(SessionNotification::StatusChanged { status });
                }
                Effect::SendToChatbot { request } => applied.request = Some(request),
            }
        }
        Ok(applied)
    }

    fn notify(&self, notification: SessionNotification) {
        // No subscribers is fine
        let _ = self.broadcast_tx.send(notification);
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the session to idle if a submit is dropped mid-request
struct InFlight<'a, C>
where
    C: ChatbotService,
{
    session: &'a ChatSession<C>,
    armed: bool,
}

impl<'a, C> InFlight<'a, C>
where
    C: ChatbotService,
{
    fn new(session: &'a ChatSession<C>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C> Drop for InFlight<'_, C>
where
    C: ChatbotService,
{
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(
            session_id = %self.session.context.session_id,
            "Submit dropped while awaiting the chatbot"
        );
        let event = Event::BotFailure {
            reason: "request abandoned".to_string(),
        };
        if let Err(e) = self.session.dispatch(event) {
            tracing::error!(error = %e, "Failed to reset abandoned request");
        }
    }
}
