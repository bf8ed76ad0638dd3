pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // HTML form
        .route(
            "/",
            get(handlers::handle_form).post(handlers::handle_form_submit),
        )
        // JSON API
        .route("/api/v1/match", post(handlers::handle_match))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
