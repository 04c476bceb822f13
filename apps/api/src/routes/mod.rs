pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::resume::handlers as resume;
use crate::skills::handlers as skills;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills/taxonomy", get(skills::handle_get_taxonomy))
        .route("/api/v1/skills/extract", post(skills::handle_extract))
        .route(
            "/api/v1/skills/test-extraction",
            post(skills::handle_test_extraction),
        )
        // Resume API
        .route(
            "/api/v1/resumes/analyze",
            post(resume::handle_analyze_resume),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
