pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analyze::handlers as analyze;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(analyze::handle_analyze))
        .route("/history", get(history::handle_history))
        .route("/resume/:id", get(history::handle_get_resume))
        .route("/analysis/:id", get(history::handle_get_analysis))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
