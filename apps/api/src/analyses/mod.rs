//! Analysis persistence — stores finished match / ATS reports per user.
//!
//! `AppState` holds an `Arc<dyn AnalysisStore>`: Postgres when `DATABASE_URL` is set,
//! the in-memory store otherwise. Every read and delete is scoped to the owning user.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisKind, AnalysisRecord};

pub mod handlers;

/// What callers hand to `save`. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub kind: AnalysisKind,
    pub overall_score: u8,
    pub total_tokens: u32,
    pub estimated_cost: f64,
    pub result: Value,
}

impl NewAnalysis {
    fn into_record(self) -> AnalysisRecord {
        AnalysisRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            resume_id: self.resume_id,
            kind: self.kind.as_str().to_string(),
            overall_score: i32::from(self.overall_score),
            total_tokens: i32::try_from(self.total_tokens).unwrap_or(i32::MAX),
            estimated_cost: self.estimated_cost,
            result: self.result,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn save(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, AppError>;

    /// Newest first, optionally filtered by kind.
    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<AnalysisKind>,
    ) -> Result<Vec<AnalysisRecord>, AppError>;

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Option<AnalysisRecord>, AppError>;

    /// Returns false when no record with this id belongs to the user.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn save(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, AppError> {
        let record = analysis.into_record();

        let saved = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            INSERT INTO analyses
                (id, user_id, resume_id, kind, overall_score, total_tokens, estimated_cost, result)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.resume_id)
        .bind(&record.kind)
        .bind(record.overall_score)
        .bind(record.total_tokens)
        .bind(record.estimated_cost)
        .bind(&record.result)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored {} analysis {} for user {}",
            saved.kind, saved.id, saved.user_id
        );
        Ok(saved)
    }

    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<AnalysisKind>,
    ) -> Result<Vec<AnalysisRecord>, AppError> {
        Ok(sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT * FROM analyses
            WHERE user_id = $1 AND ($2::text IS NULL OR kind = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Option<AnalysisRecord>, AppError> {
        Ok(sqlx::query_as::<_, AnalysisRecord>(
            "SELECT * FROM analyses WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryAnalysisStore {
    records: RwLock<Vec<AnalysisRecord>>,
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn save(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, AppError> {
        let record = analysis.into_record();
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<AnalysisKind>,
    ) -> Result<Vec<AnalysisRecord>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .filter(|r| kind.map_or(true, |k| r.kind == k.as_str()))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Option<AnalysisRecord>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(records.len() < before)
    }
}
