pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod reply;
pub mod state;
pub mod twiml;

use axum::{Router, routing::{any, get}};
use std::sync::Arc;

use crate::handlers::{health_handler, metrics_handler, webhook_handler};
use crate::state::AppState;

// Path the messaging provider posts to
pub const WEBHOOK_PATH: &str = "/api/webhook";

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(WEBHOOK_PATH, any(webhook_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
