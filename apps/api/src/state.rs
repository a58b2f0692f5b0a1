use std::sync::Arc;

use crate::analyses::AnalysisStore;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion backend. `LlmClient` in production.
    pub llm: Arc<dyn ChatModel>,
    /// Postgres-backed when `DATABASE_URL` is set, in-memory otherwise.
    pub analyses: Arc<dyn AnalysisStore>,
}
