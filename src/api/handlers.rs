//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    CalculateRequest, CalculationResponse, ChatOutcome, ChatRequest, ChatResponse,
    ChatStateResponse, DraftRequest, ErrorResponse, SuccessResponse,
};
use super::AppState;
use crate::runtime::SubmitOutcome;
use crate::session::TransitionError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Calculator
        .route(
            "/api/calculate",
            get(get_calculation).post(calculate).delete(clear_calculation),
        )
        // Chat panel
        .route("/api/chat", get(get_chat).post(send_chat))
        .route("/api/chat/draft", put(set_draft))
        .route("/api/chat/stream", get(stream_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Calculator
// ============================================================

async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Json<CalculationResponse> {
    let mut panel = state.calculator.write().await;
    let calculation = panel.update(req.input.as_deref()).clone();
    if calculation.is_invalid() {
        tracing::debug!(input = ?req.input, "Calculator input is not a number");
    }
    Json(CalculationResponse::new(req.input, calculation))
}

async fn clear_calculation(State(state): State<AppState>) -> Json<CalculationResponse> {
    let mut panel = state.calculator.write().await;
    panel.clear();
    Json(CalculationResponse::new(None, panel.calculation().clone()))
}

async fn get_calculation(State(state): State<AppState>) -> Json<CalculationResponse> {
    let panel = state.calculator.read().await;
    Json(CalculationResponse::new(
        panel.input().map(str::to_string),
        panel.calculation().clone(),
    ))
}

// ============================================================
// Chat
// ============================================================

async fn get_chat(State(state): State<AppState>) -> Json<ChatStateResponse> {
    let snapshot = state.session.snapshot();
    Json(ChatStateResponse {
        session_id: snapshot.session_id,
        status: snapshot.status,
        busy: snapshot.status.is_busy(),
        draft: snapshot.draft,
        messages: snapshot.messages,
    })
}

async fn set_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Json<SuccessResponse> {
    state.session.set_draft(req.text);
    Json(SuccessResponse { success: true })
}

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let outcome = match req.text {
        Some(text) => state.session.submit(&text).await?,
        None => state.session.submit_draft().await?,
    };

    let response = match outcome {
        SubmitOutcome::Ignored => ChatResponse {
            outcome: ChatOutcome::Ignored,
            reply: None,
        },
        SubmitOutcome::Answered { reply } => ChatResponse {
            outcome: ChatOutcome::Answered,
            reply: Some(reply),
        },
        SubmitOutcome::Failed { reply } => ChatResponse {
            outcome: ChatOutcome::Failed,
            reply: Some(reply),
        },
    };
    Ok(Json(response))
}

async fn stream_chat(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before the snapshot so nothing falls between them
    let broadcast_rx = state.session.subscribe();
    let snapshot = state.session.snapshot();
    sse_stream(snapshot, broadcast_rx)
}

async fn get_version() -> &'static str {
    concat!("odorant-desk ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Conflict(String),
    Internal(String),
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::Busy => AppError::Conflict(e.to_string()),
            TransitionError::InvalidTransition(_) => {
                tracing::error!(error = %e, "Session rejected its own transition");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
