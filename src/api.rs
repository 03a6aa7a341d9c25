//! HTTP API for the calculator and chat panels

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::calculator::CalculatorPanel;
use crate::runtime::ProductionSession;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ProductionSession>,
    pub calculator: Arc<RwLock<CalculatorPanel>>,
}

impl AppState {
    pub fn new(session: ProductionSession) -> Self {
        Self {
            session: Arc::new(session),
            calculator: Arc::new(RwLock::new(CalculatorPanel::new())),
        }
    }
}
