//! Single-call ATS scoring against the fixed rubric.
//!
//! Unlike the section analyzers, a response that is not the expected JSON object is not
//! an error here: it becomes `AtsOutcome::Unparseable` so the caller can answer 422.

use serde::Serialize;
use tracing::{info, warn};

use crate::ats::models::AtsReport;
use crate::ats::prompts::{ats_prompt, ATS_MAX_TOKENS, ATS_ROLE, ATS_TEMPERATURE};
use crate::errors::AnalysisError;
use crate::llm_client::pricing::UsageReport;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{ChatModel, ChatRequest, LlmError};
use crate::matching::sections::validate_job_description;

pub const RESUME_TEXT_REQUIRED: &str = "Resume text is required";
pub const UNPARSEABLE_REPORT: &str = "Failed to parse ATS analysis";

#[derive(Debug, Clone, Serialize)]
pub struct ScoredResume {
    pub report: AtsReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rubric_violations: Vec<String>,
    #[serde(flatten)]
    pub usage: UsageReport,
}

#[derive(Debug, Clone)]
pub enum AtsOutcome {
    Scored(ScoredResume),
    Unparseable { message: String, usage: UsageReport },
}

pub async fn score_against_jd(
    model: &dyn ChatModel,
    resume_text: &str,
    job_description: &str,
) -> Result<AtsOutcome, AnalysisError> {
    let resume_text = resume_text.trim();
    if resume_text.is_empty() {
        return Err(AnalysisError::validation(RESUME_TEXT_REQUIRED));
    }
    let jd = validate_job_description(job_description)?;

    let system = system_prompt(ATS_ROLE);
    let prompt = ats_prompt(resume_text, jd);
    let completion = model
        .complete(ChatRequest {
            system: &system,
            user: &prompt,
            temperature: ATS_TEMPERATURE,
            max_tokens: ATS_MAX_TOKENS,
        })
        .await?;
    let usage = UsageReport::from_completion(&completion);

    let parsed = completion
        .json()
        .and_then(|value| serde_json::from_value::<AtsReport>(value).map_err(LlmError::from));
    let report = match parsed {
        Ok(report) => report,
        Err(e) => {
            warn!("ATS response could not be parsed: {e}");
            return Ok(AtsOutcome::Unparseable {
                message: UNPARSEABLE_REPORT.to_string(),
                usage,
            });
        }
    };

    let rubric_violations = report.rubric_violations();
    if !rubric_violations.is_empty() {
        warn!(
            "ATS report breaks the rubric: {}",
            rubric_violations.join("; ")
        );
    }
    info!(
        "ATS scored {}/100 ({:?}), {} tokens",
        report.overall_score, report.overall_fit, usage.tokens_used
    );

    Ok(AtsOutcome::Scored(ScoredResume {
        report,
        rubric_violations,
        usage,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::models::OverallFit;
    use crate::llm_client::testing::{usage, ScriptedModel};

    const JD: &str = "Senior Go Engineer, SQL required";
    const RESUME: &str = "Jane Doe\nSKILLS\nGo, SQL";

    const GOOD_REPORT: &str = r#"{
        "overall_score": 74,
        "category_scores": {"keyword_match": 24, "experience_relevance": 18,
                            "skills_alignment": 15, "formatting": 11, "impact": 6},
        "missing_keywords": ["Kubernetes"],
        "matched_keywords": ["Go", "SQL"],
        "format_issues": [],
        "improvement_suggestions": ["Quantify impact"],
        "strengths": ["Relevant backend work"],
        "overall_fit": "Good"
    }"#;

    #[tokio::test]
    async fn test_scored_report_carries_usage() {
        let model =
            ScriptedModel::new().reply_when("applicant tracking system", GOOD_REPORT, usage(900, 300));

        let outcome = score_against_jd(&model, RESUME, JD).await.unwrap();

        let AtsOutcome::Scored(scored) = outcome else {
            panic!("expected a scored report");
        };
        assert_eq!(scored.report.overall_score, 74);
        assert_eq!(scored.report.overall_fit, OverallFit::Good);
        assert!(scored.rubric_violations.is_empty());
        assert_eq!(scored.usage.tokens_used, 1200);

        let json = serde_json::to_value(&scored).unwrap();
        assert!(json.get("rubric_violations").is_none());
        assert_eq!(json["tokensUsed"], 1200);
        assert_eq!(json["report"]["category_scores"]["impact"], 6);

        let call = &model.calls()[0];
        assert!(call.system.contains("conservative and rule-driven"));
        assert!(call.user.contains("keyword_match (0-30)"));
        assert!(call.user.contains(RESUME));
        assert_eq!(call.max_tokens, ATS_MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_rubric_violations_are_reported_not_corrected() {
        let over_ceiling = r#"{
            "overall_score": 95,
            "category_scores": {"keyword_match": 40, "experience_relevance": 20,
                                "skills_alignment": 15, "formatting": 10, "impact": 10},
            "overall_fit": "Excellent"
        }"#;
        let model =
            ScriptedModel::new().reply_when("applicant tracking system", over_ceiling, usage(10, 10));

        let AtsOutcome::Scored(scored) = score_against_jd(&model, RESUME, JD).await.unwrap() else {
            panic!("expected a scored report");
        };
        assert_eq!(scored.report.category_scores.keyword_match, 40);
        assert_eq!(scored.report.overall_score, 95);
        assert_eq!(scored.rubric_violations, vec!["keyword_match 40 exceeds ceiling 30"]);

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["rubric_violations"][0], "keyword_match 40 exceeds ceiling 30");
    }

    #[tokio::test]
    async fn test_non_json_content_is_unparseable_not_error() {
        let model = ScriptedModel::new().reply_when(
            "applicant tracking system",
            "Score: 80/100. Nice resume!",
            usage(100, 20),
        );
        let outcome = score_against_jd(&model, RESUME, JD).await.unwrap();
        match outcome {
            AtsOutcome::Unparseable { message, usage } => {
                assert_eq!(message, UNPARSEABLE_REPORT);
                assert_eq!(usage.tokens_used, 120);
            }
            AtsOutcome::Scored(_) => panic!("expected unparseable"),
        }
    }

    #[tokio::test]
    async fn test_json_without_rubric_fields_is_unparseable() {
        let model = ScriptedModel::new().reply_when(
            "applicant tracking system",
            r#"{"score": 80}"#,
            usage(10, 5),
        );
        assert!(matches!(
            score_against_jd(&model, RESUME, JD).await.unwrap(),
            AtsOutcome::Unparseable { .. }
        ));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let model = ScriptedModel::new().fail_when("applicant tracking system", 500, "boom");
        let err = score_against_jd(&model, RESUME, JD).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Llm(LlmError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_blank_inputs_fail_without_calling_model() {
        let model = ScriptedModel::new();
        assert!(matches!(
            score_against_jd(&model, "  ", JD).await,
            Err(AnalysisError::Validation(ref m)) if m == RESUME_TEXT_REQUIRED
        ));
        assert!(matches!(
            score_against_jd(&model, RESUME, "").await,
            Err(AnalysisError::Validation(_))
        ));
        assert_eq!(model.call_count(), 0);
    }
}
