//! Server-Sent Events support

use crate::runtime::{SessionNotification, SessionSnapshot};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Snapshot first, then every session notification
pub fn sse_stream(
    init: SessionSnapshot,
    broadcast_rx: broadcast::Receiver<SessionNotification>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(init_event(&init)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(notification) => Some(Ok(notification_event(notification))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(snapshot: &SessionSnapshot) -> Event {
    let data = json!({
        "type": "init",
        "session_id": snapshot.session_id,
        "status": snapshot.status,
        "draft": snapshot.draft,
        "messages": snapshot.messages,
    });
    Event::default().event("init").data(data.to_string())
}

fn notification_event(notification: SessionNotification) -> Event {
    match notification {
        SessionNotification::MessageAppended { message } => {
            let id = message.id().to_string();
            let data = json!({ "type": "message", "message": message });
            Event::default().event("message").id(id).data(data.to_string())
        }
        SessionNotification::StatusChanged { status } => {
            let data = json!({ "type": "status", "status": status });
            Event::default().event("status").data(data.to_string())
        }
        SessionNotification::DraftCleared => Event::default()
            .event("draft_cleared")
            .data(json!({ "type": "draft_cleared" }).to_string()),
    }
}
