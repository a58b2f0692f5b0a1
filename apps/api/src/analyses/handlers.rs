use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisKind, AnalysisRecord};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub user_id: Uuid,
    pub kind: Option<String>,
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<AnalysisRecord>>, AppError> {
    let kind = match params.kind.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            AnalysisKind::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown analysis kind '{raw}'")))?,
        ),
    };
    let records = state.analyses.list(params.user_id, kind).await?;
    Ok(Json(records))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisRecord>, AppError> {
    let record = state
        .analyses
        .get(id, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(record))
}

/// DELETE /api/v1/analyses/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !state.analyses.delete(id, params.user_id).await? {
        return Err(AppError::NotFound(format!("Analysis {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
