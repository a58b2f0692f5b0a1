//! Axum route handlers for the job matcher.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyses::NewAnalysis;
use crate::errors::AppError;
use crate::matching::aggregator::match_resume_to_jd;
use crate::matching::models::{MatchReport, ResumeContent};
use crate::models::analysis::AnalysisKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchRequest {
    #[serde(alias = "user_id")]
    pub user_id: Uuid,
    #[serde(default, alias = "resume_id")]
    pub resume_id: Option<Uuid>,
    #[serde(default, alias = "job_description")]
    pub job_description: String,
    #[serde(flatten)]
    pub resume: ResumeContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    #[serde(flatten)]
    pub report: MatchReport,
}

/// POST /api/v1/analysis/job-matcher
///
/// Scores each present resume section against the JD and stores the report.
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<JobMatchResponse>, AppError> {
    let report =
        match_resume_to_jd(state.llm.as_ref(), &request.resume, &request.job_description).await?;

    let record = state
        .analyses
        .save(NewAnalysis {
            user_id: request.user_id,
            resume_id: request.resume_id,
            kind: AnalysisKind::JobMatch,
            overall_score: report.overall_match_score,
            total_tokens: report.total_tokens,
            estimated_cost: report.estimated_cost,
            result: serde_json::to_value(&report)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize report: {e}")))?,
        })
        .await?;

    Ok(Json(JobMatchResponse {
        success: true,
        analysis_id: record.id,
        report,
    }))
}
