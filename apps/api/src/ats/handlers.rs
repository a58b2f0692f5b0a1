//! Axum route handlers for ATS scoring.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analyses::NewAnalysis;
use crate::ats::analyzer::{score_against_jd, AtsOutcome, ScoredResume};
use crate::ats::extract::extract_resume_text;
use crate::ats::formatter::{format_resume_text, BuiltResume};
use crate::ats::models::OVERALL_MAX;
use crate::errors::AppError;
use crate::models::analysis::AnalysisKind;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    #[serde(flatten)]
    pub scored: ScoredResume,
}

#[derive(Debug, Deserialize)]
pub struct BuiltResumeRequest {
    #[serde(alias = "userId")]
    pub user_id: Uuid,
    #[serde(default, alias = "resumeId")]
    pub resume_id: Option<Uuid>,
    #[serde(default)]
    pub resume: BuiltResume,
    #[serde(default, alias = "jobDescription")]
    pub job_description: String,
}

/// Fields collected from the upload form.
#[derive(Default)]
struct UploadForm {
    user_id: Option<String>,
    resume_id: Option<String>,
    job_description: Option<String>,
    file_name: Option<String>,
    content_type: Option<String>,
    file: Option<Bytes>,
}

/// POST /api/v1/ats/analyze-resume
///
/// Multipart upload: `user_id`, `job_description`, optional `resume_id`, and `file`
/// (PDF, .txt or .md).
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AtsResponse>, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "resume" => {
                form.file_name = field.file_name().map(str::to_string);
                form.content_type = field.content_type().map(str::to_string);
                form.file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?);
            }
            "user_id" | "userId" => form.user_id = Some(read_text(field).await?),
            "resume_id" | "resumeId" => form.resume_id = Some(read_text(field).await?),
            "job_description" | "jobDescription" => {
                form.job_description = Some(read_text(field).await?)
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let user_id = parse_uuid("user_id", form.user_id.as_deref())?
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let resume_id = parse_uuid("resume_id", form.resume_id.as_deref())?;
    let bytes = form
        .file
        .ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;

    let (file_name, content_type) = (form.file_name, form.content_type);
    let resume_text = tokio::task::spawn_blocking(move || {
        extract_resume_text(file_name.as_deref(), content_type.as_deref(), &bytes)
    })
    .await
    .map_err(|e| AppError::Validation(format!("Could not read resume file: {e}")))??;

    let outcome = score_against_jd(
        state.llm.as_ref(),
        &resume_text,
        form.job_description.as_deref().unwrap_or_default(),
    )
    .await?;
    store_outcome(&state, user_id, resume_id, outcome).await
}

/// POST /api/v1/ats/analyze-built-resume
///
/// Scores a resume composed in the builder, flattened to plain text first.
pub async fn handle_analyze_built_resume(
    State(state): State<AppState>,
    Json(request): Json<BuiltResumeRequest>,
) -> Result<Json<AtsResponse>, AppError> {
    let resume_text = format_resume_text(&request.resume);
    let outcome =
        score_against_jd(state.llm.as_ref(), &resume_text, &request.job_description).await?;
    store_outcome(&state, request.user_id, request.resume_id, outcome).await
}

async fn store_outcome(
    state: &AppState,
    user_id: Uuid,
    resume_id: Option<Uuid>,
    outcome: AtsOutcome,
) -> Result<Json<AtsResponse>, AppError> {
    let scored = match outcome {
        AtsOutcome::Scored(scored) => scored,
        AtsOutcome::Unparseable { message, usage } => {
            warn!(
                "Discarding unparseable ATS response for user {user_id} ({} tokens spent)",
                usage.tokens_used
            );
            return Err(AppError::UnprocessableEntity(message));
        }
    };

    let record = state
        .analyses
        .save(NewAnalysis {
            user_id,
            resume_id,
            kind: AnalysisKind::Ats,
            // Out-of-rubric totals are kept in `result`; the indexed column stays in range.
            overall_score: scored.report.overall_score.min(OVERALL_MAX) as u8,
            total_tokens: scored.usage.tokens_used,
            estimated_cost: scored.usage.estimated_cost,
            result: serde_json::to_value(&scored).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize ATS report: {e}"))
            })?,
        })
        .await?;

    Ok(Json(AtsResponse {
        success: true,
        analysis_id: record.id,
        scored,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))
}

fn parse_uuid(name: &str, raw: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{name} must be a UUID"))),
    }
}
