pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::upload::handlers;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume upload
        .route("/api/upload", post(handlers::handle_upload_resume))
        .route("/api/upload/", post(handlers::handle_upload_resume))
        .layer(body_limit)
        .with_state(state)
}
