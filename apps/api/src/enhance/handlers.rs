use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::enhance::{enhance_summary, EnhancedSummary};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhanceSummaryRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default, alias = "targetRole")]
    pub target_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceSummaryResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: EnhancedSummary,
}

/// POST /api/v1/ai/enhance-summary
pub async fn handle_enhance_summary(
    State(state): State<AppState>,
    Json(request): Json<EnhanceSummaryRequest>,
) -> Result<Json<EnhanceSummaryResponse>, AppError> {
    let result = enhance_summary(
        state.llm.as_ref(),
        &request.summary,
        request.target_role.as_deref(),
    )
    .await?;
    Ok(Json(EnhanceSummaryResponse {
        success: true,
        result,
    }))
}
