//! Summary enhancement. Rewrites a professional summary with the truthfulness rule applied.
//! Results are returned to the caller only; nothing is persisted.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enhance::prompts::{
    ANY_ROLE, ENHANCE_MAX_TOKENS, ENHANCE_PROMPT_TEMPLATE, ENHANCE_ROLE, ENHANCE_TEMPERATURE,
};
use crate::errors::AnalysisError;
use crate::llm_client::pricing::UsageReport;
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{ChatModel, ChatRequest, LlmError};

pub mod handlers;
pub mod prompts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhancedContent {
    enhanced_summary: String,
    #[serde(default)]
    key_changes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedSummary {
    pub enhanced_summary: String,
    pub key_changes: Vec<String>,
    #[serde(flatten)]
    pub usage: UsageReport,
}

pub async fn enhance_summary(
    model: &dyn ChatModel,
    summary: &str,
    target_role: Option<&str>,
) -> Result<EnhancedSummary, AnalysisError> {
    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AnalysisError::validation("Summary is required"));
    }
    let target_role = target_role
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(ANY_ROLE);

    let system = system_prompt(ENHANCE_ROLE);
    let prompt = fill_template(
        ENHANCE_PROMPT_TEMPLATE,
        &[("summary", summary), ("target_role", target_role)],
    );
    let completion = model
        .complete(ChatRequest {
            system: &system,
            user: &prompt,
            temperature: ENHANCE_TEMPERATURE,
            max_tokens: ENHANCE_MAX_TOKENS,
        })
        .await?;

    let content: EnhancedContent = serde_json::from_value(completion.json()?)
        .map_err(LlmError::from)?;
    let usage = UsageReport::from_completion(&completion);
    info!("Summary enhanced ({} tokens)", usage.tokens_used);

    Ok(EnhancedSummary {
        enhanced_summary: content.enhanced_summary,
        key_changes: content.key_changes,
        usage,
    })
}
