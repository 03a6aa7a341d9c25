//! Odorant desk - dosing calculator with an assistant chat panel
//!
//! Serves the odorant calculator and a single chatbot session to the
//! browser panel over a small JSON API.

mod api;
mod calculator;
mod chatbot;
mod runtime;
mod session;

use api::{create_router, AppState};
use chatbot::ChatbotConfig;
use runtime::ChatSession;
use session::SessionContext;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odorant_desk=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("ODORANT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let bind: IpAddr = std::env::var("ODORANT_BIND")
        .ok()
        .and_then(|b| b.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let chatbot_config = ChatbotConfig::from_env()?;
    match &chatbot_config.url {
        Some(url) => tracing::info!(
            url = %url,
            chatbot = %chatbot_config.chatbot_name,
            timeout_secs = chatbot_config.timeout.as_secs(),
            "Chatbot configured"
        ),
        None => tracing::warn!("No chatbot endpoint configured. Set CHATBOT_URL."),
    }
    let chatbot = chatbot::build_service(&chatbot_config)?;

    // One session per process lifetime
    let context = SessionContext::new(
        chatbot_config.chatbot_name.clone(),
        chatbot_config.username.clone(),
        chatbot_config.fallback_message.clone(),
    );
    let state = AppState::new(ChatSession::new(context, chatbot));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::new(bind, port);
    tracing::info!("Odorant desk listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
