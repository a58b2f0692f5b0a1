use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::llm_client::pricing::serialize_usd;

/// Stored as text; see `as_str` / `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    JobMatch,
    Ats,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::JobMatch => "job_match",
            AnalysisKind::Ats => "ats",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "job_match" => Some(AnalysisKind::JobMatch),
            "ats" => Some(AnalysisKind::Ats),
            _ => None,
        }
    }
}

/// A stored analysis. Append-only: rows are inserted and deleted, never updated.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub kind: String,
    pub overall_score: i32,
    pub total_tokens: i32,
    #[serde(serialize_with = "serialize_usd")]
    pub estimated_cost: f64,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}
