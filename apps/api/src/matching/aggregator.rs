//! Comprehensive job matcher — runs every present section analyzer concurrently and
//! folds the results into one `MatchReport`.
//!
//! Flow: validate JD → validate at least one section → try_join(section analyzers) →
//!       mean of usable scores → token/cost sums → insights.
//!
//! The join is all-or-nothing: the first failing section fails the whole match.

use std::collections::HashSet;
use std::future::Future;

use tracing::{info, warn};

use crate::errors::AnalysisError;
use crate::llm_client::pricing::UsageReport;
use crate::llm_client::ChatModel;
use crate::matching::models::{
    MatchReport, MatchingInsights, ResumeContent, Section, SectionAnalyses,
};
use crate::matching::sections::{
    analyze_experiences, analyze_projects, analyze_skills, analyze_summary,
    validate_job_description,
};

/// Scores at or above this are reported as a strong match.
pub const STRONG_MATCH_THRESHOLD: u8 = 70;
pub const MAX_INSIGHT_STRENGTHS: usize = 5;

pub const SECTION_REQUIRED: &str = "At least one resume section is required";

pub async fn match_resume_to_jd(
    model: &dyn ChatModel,
    resume: &ResumeContent,
    job_description: &str,
) -> Result<MatchReport, AnalysisError> {
    let jd = validate_job_description(job_description)?;
    if resume.is_empty() {
        return Err(AnalysisError::validation(SECTION_REQUIRED));
    }

    let (summary, experiences, skills, projects) = tokio::try_join!(
        attempt(
            Section::Summary,
            resume.summary_text().map(|s| analyze_summary(model, s, jd)),
        ),
        attempt(
            Section::Experiences,
            (!resume.experiences.is_empty())
                .then(|| analyze_experiences(model, &resume.experiences, jd)),
        ),
        attempt(
            Section::Skills,
            (!resume.skills.is_empty()).then(|| analyze_skills(model, &resume.skills, jd)),
        ),
        attempt(
            Section::Projects,
            (!resume.projects.is_empty()).then(|| analyze_projects(model, &resume.projects, jd)),
        ),
    )?;

    let analyses = SectionAnalyses {
        summary,
        experiences,
        skills,
        projects,
    };

    let scores: Vec<f64> = [
        analyses.summary.as_ref().and_then(|a| a.analysis.score()),
        analyses.experiences.as_ref().and_then(|a| a.analysis.score()),
        analyses.skills.as_ref().and_then(|a| a.analysis.score()),
        analyses.projects.as_ref().and_then(|a| a.analysis.score()),
    ]
    .into_iter()
    .flatten()
    .collect();
    let overall_match_score = overall_score(&scores);

    let usage = UsageReport::sum(
        [
            analyses.summary.as_ref().map(|a| &a.usage),
            analyses.experiences.as_ref().map(|a| &a.usage),
            analyses.skills.as_ref().map(|a| &a.usage),
            analyses.projects.as_ref().map(|a| &a.usage),
        ]
        .into_iter()
        .flatten(),
    );

    let matching_insights = MatchingInsights {
        strengths: collect_strengths(&analyses),
        recommendation: recommendation(overall_match_score).to_string(),
    };

    info!(
        "Job match scored {overall_match_score}/100 from {} section score(s), {} tokens",
        scores.len(),
        usage.tokens_used
    );

    Ok(MatchReport {
        overall_match_score,
        analyses,
        total_tokens: usage.tokens_used,
        estimated_cost: usage.estimated_cost,
        matching_insights,
    })
}

/// Runs a section analyzer if the section is present. Skipped sections yield `None`.
async fn attempt<T, F>(section: Section, run: Option<F>) -> Result<Option<T>, AnalysisError>
where
    F: Future<Output = Result<T, AnalysisError>>,
{
    let Some(run) = run else {
        return Ok(None);
    };
    run.await.map(Some).map_err(|e| {
        warn!("{} section analysis failed: {e}", section.as_str());
        e
    })
}

/// Rounded mean of the usable section scores; 0 when none contributed.
pub fn overall_score(scores: &[f64]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

pub fn recommendation(score: u8) -> &'static str {
    if score >= STRONG_MATCH_THRESHOLD {
        "Strong match"
    } else {
        "Moderate match"
    }
}

/// Summary strengths first, then matched skills. Case-insensitive dedup, capped.
fn collect_strengths(analyses: &SectionAnalyses) -> Vec<String> {
    let summary = analyses
        .summary
        .as_ref()
        .and_then(|a| a.analysis.structured())
        .map(|s| s.strengths.as_slice())
        .unwrap_or_default();
    let skills = analyses
        .skills
        .as_ref()
        .and_then(|a| a.analysis.structured())
        .map(|s| s.matched_skills.as_slice())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    summary
        .iter()
        .chain(skills)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .take(MAX_INSIGHT_STRENGTHS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{usage, ScriptedModel};
    use crate::matching::models::{Experience, Project};

    const JD: &str = "Senior Go Engineer, SQL required";

    fn scenario_resume() -> ResumeContent {
        ResumeContent {
            summary: Some("5 years backend engineer".to_string()),
            experiences: vec![],
            skills: vec!["Go".to_string(), "SQL".to_string()],
            projects: vec![],
        }
    }

    fn full_resume() -> ResumeContent {
        ResumeContent {
            summary: Some("Backend engineer".to_string()),
            experiences: vec![Experience {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                desc: "Go microservices".to_string(),
            }],
            skills: vec!["Go".to_string()],
            projects: vec![Project {
                name: "ledger".to_string(),
                kind: "personal".to_string(),
                description: "Postgres-backed ledger".to_string(),
            }],
        }
    }

    fn full_model() -> ScriptedModel {
        ScriptedModel::new()
            .reply_when(
                "summary analyst",
                r#"{"matchScore": 80, "strengths": ["Backend depth", "Go"]}"#,
                usage(100, 50),
            )
            .reply_when(
                "experience analyst",
                r#"{"overallExperienceMatch": 60}"#,
                usage(200, 80),
            )
            .reply_when(
                "skills analyst",
                r#"{"matchPercentage": 90, "matchedSkills": ["go", "SQL"]}"#,
                usage(90, 30),
            )
            .reply_when(
                "project analyst",
                r#"{"overallProjectMatch": 55}"#,
                usage(150, 60),
            )
    }

    #[tokio::test]
    async fn test_scenario_only_present_sections_run() {
        let model = full_model();

        let report = match_resume_to_jd(&model, &scenario_resume(), JD)
            .await
            .unwrap();

        assert_eq!(model.call_count(), 2);
        assert!(report.analyses.summary.is_some());
        assert!(report.analyses.skills.is_some());
        assert!(report.analyses.experiences.is_none());
        assert!(report.analyses.projects.is_none());
        // mean(80, 90)
        assert_eq!(report.overall_match_score, 85);
        assert_eq!(report.total_tokens, 150 + 120);
        assert_eq!(report.matching_insights.recommendation, "Strong match");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["analyses"]["experiences"].is_null());
        assert!(json["analyses"]["projects"].is_null());
        assert_eq!(json["overallMatchScore"], 85);
    }

    #[tokio::test]
    async fn test_empty_job_description_makes_no_calls() {
        let model = full_model();
        let err = match_resume_to_jd(&model, &full_resume(), "")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Job description is required");
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_sections_empty_makes_no_calls() {
        let model = full_model();
        let resume = ResumeContent {
            summary: Some("  ".to_string()),
            ..Default::default()
        };
        let err = match_resume_to_jd(&model, &resume, JD).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(ref m) if m == SECTION_REQUIRED));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_sections_aggregate_tokens_and_cost() {
        let model = full_model();

        let report = match_resume_to_jd(&model, &full_resume(), JD).await.unwrap();

        assert_eq!(model.call_count(), 4);
        // mean(80, 60, 90, 55) = 71.25
        assert_eq!(report.overall_match_score, 71);
        assert_eq!(report.total_tokens, 150 + 280 + 120 + 210);

        let section_cost: f64 = [
            report.analyses.summary.as_ref().unwrap().usage.estimated_cost,
            report.analyses.experiences.as_ref().unwrap().usage.estimated_cost,
            report.analyses.skills.as_ref().unwrap().usage.estimated_cost,
            report.analyses.projects.as_ref().unwrap().usage.estimated_cost,
        ]
        .iter()
        .sum();
        assert!((report.estimated_cost - section_cost).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_section_without_usable_score_is_excluded_from_mean() {
        let model = ScriptedModel::new()
            .reply_when("summary analyst", r#"{"strengths": ["Go"]}"#, usage(10, 10))
            .reply_when(
                "skills analyst",
                r#"{"matchPercentage": 40}"#,
                usage(10, 10),
            );

        let report = match_resume_to_jd(&model, &scenario_resume(), JD)
            .await
            .unwrap();

        assert_eq!(report.overall_match_score, 40);
        // Attempted sections still count toward tokens.
        assert_eq!(report.total_tokens, 40);
        assert_eq!(report.matching_insights.recommendation, "Moderate match");
    }

    #[tokio::test]
    async fn test_malformed_nested_field_keeps_section_score() {
        let model = ScriptedModel::new()
            .reply_when("summary analyst", r#"{"matchScore": 40}"#, usage(10, 10))
            .reply_when(
                "experience analyst",
                r#"{"overallExperienceMatch": 90,
                    "experienceAnalysis": [{"role": "Engineer", "company": null}]}"#,
                usage(10, 10),
            );
        let resume = ResumeContent {
            summary: Some("Backend engineer".to_string()),
            experiences: full_resume().experiences,
            ..Default::default()
        };

        let report = match_resume_to_jd(&model, &resume, JD).await.unwrap();

        // mean(40, 90)
        assert_eq!(report.overall_match_score, 65);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["analyses"]["experiences"]["analysis"]["experienceAnalysis"][0]["company"]
            .is_null());
    }

    #[tokio::test]
    async fn test_no_usable_scores_yields_zero() {
        let model = ScriptedModel::new()
            .reply_when("summary analyst", r#"{"matchScore": null}"#, usage(5, 5))
            .reply_when("skills analyst", r#""looks good""#, usage(5, 5));

        let report = match_resume_to_jd(&model, &scenario_resume(), JD)
            .await
            .unwrap();
        assert_eq!(report.overall_match_score, 0);
    }

    #[tokio::test]
    async fn test_one_failing_section_fails_the_match() {
        let model = ScriptedModel::new()
            .reply_when("summary analyst", r#"{"matchScore": 80}"#, usage(5, 5))
            .fail_when("skills analyst", 429, "Rate limit reached");

        let err = match_resume_to_jd(&model, &scenario_resume(), JD)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Llm(_)));
        assert!(!err.to_string().contains("skills"));
    }

    #[tokio::test]
    async fn test_strengths_are_deduplicated_and_ordered() {
        let model = full_model();
        let report = match_resume_to_jd(&model, &full_resume(), JD).await.unwrap();
        assert_eq!(
            report.matching_insights.strengths,
            vec!["Backend depth", "Go", "SQL"]
        );
    }

    #[test]
    fn test_overall_score_bounds_and_rounding() {
        assert_eq!(overall_score(&[]), 0);
        assert_eq!(overall_score(&[100.0, 100.0]), 100);
        assert_eq!(overall_score(&[0.0]), 0);
        assert_eq!(overall_score(&[70.5]), 71);
        assert_eq!(overall_score(&[33.0, 34.0]), 34);
    }

    #[test]
    fn test_recommendation_threshold_is_inclusive() {
        assert_eq!(recommendation(STRONG_MATCH_THRESHOLD), "Strong match");
        assert_eq!(recommendation(STRONG_MATCH_THRESHOLD - 1), "Moderate match");
    }
}
