pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analyses::handlers as analyses;
use crate::ats::extract::MAX_UPLOAD_BYTES;
use crate::ats::handlers as ats;
use crate::enhance::handlers as enhance;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job matcher
        .route(
            "/api/v1/analysis/job-matcher",
            post(matching::handle_job_match),
        )
        // ATS
        .route(
            "/api/v1/ats/analyze-resume",
            post(ats::handle_analyze_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/v1/ats/analyze-built-resume",
            post(ats::handle_analyze_built_resume),
        )
        // AI helpers
        .route(
            "/api/v1/ai/enhance-summary",
            post(enhance::handle_enhance_summary),
        )
        // Stored analyses
        .route("/api/v1/analyses", get(analyses::handle_list_analyses))
        .route(
            "/api/v1/analyses/:id",
            get(analyses::handle_get_analysis).delete(analyses::handle_delete_analysis),
        )
        .with_state(state)
}
