//! Section analyzers, one LLM call per resume section.
//!
//! Each analyzer validates its input before touching the network, then asks for a
//! section-specific JSON object. Empty or non-JSON content is an error and propagates;
//! any other JSON is kept as sent, and a missing or non-numeric score only drops the
//! section from the overall mean.

use tracing::{debug, warn};

use crate::errors::AnalysisError;
use crate::llm_client::pricing::UsageReport;
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{ChatModel, ChatRequest};
use crate::matching::models::{
    Experience, ExperienceFindings, Findings, Project, ProjectFindings, SectionAnalysis,
    SectionShape, SkillsFindings, SummaryFindings,
};
use crate::matching::prompts::{
    EXPERIENCE_PROMPT_TEMPLATE, EXPERIENCE_ROLE, PROJECT_PROMPT_TEMPLATE, PROJECT_ROLE,
    SECTION_MAX_TOKENS, SECTION_TEMPERATURE, SKILLS_PROMPT_TEMPLATE, SKILLS_ROLE,
    SUMMARY_PROMPT_TEMPLATE, SUMMARY_ROLE,
};

pub const JOB_DESCRIPTION_REQUIRED: &str = "Job description is required";

/// Returns the trimmed JD, or a validation error if there is nothing left.
pub fn validate_job_description(job_description: &str) -> Result<&str, AnalysisError> {
    let trimmed = job_description.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::validation(JOB_DESCRIPTION_REQUIRED));
    }
    Ok(trimmed)
}

pub async fn analyze_summary(
    model: &dyn ChatModel,
    summary: &str,
    job_description: &str,
) -> Result<SectionAnalysis<SummaryFindings>, AnalysisError> {
    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AnalysisError::validation("Summary is required"));
    }
    let jd = validate_job_description(job_description)?;

    let prompt = fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[("summary", summary), ("job_description", jd)],
    );
    run_section(model, SUMMARY_ROLE, &prompt).await
}

pub async fn analyze_experiences(
    model: &dyn ChatModel,
    experiences: &[Experience],
    job_description: &str,
) -> Result<SectionAnalysis<ExperienceFindings>, AnalysisError> {
    if experiences.is_empty() {
        return Err(AnalysisError::validation("Experience data is required"));
    }
    let jd = validate_job_description(job_description)?;

    let rendered = render_experiences(experiences);
    let prompt = fill_template(
        EXPERIENCE_PROMPT_TEMPLATE,
        &[("experiences", rendered.as_str()), ("job_description", jd)],
    );
    run_section(model, EXPERIENCE_ROLE, &prompt).await
}

pub async fn analyze_skills(
    model: &dyn ChatModel,
    skills: &[String],
    job_description: &str,
) -> Result<SectionAnalysis<SkillsFindings>, AnalysisError> {
    if skills.is_empty() {
        return Err(AnalysisError::validation("Skills data is required"));
    }
    let jd = validate_job_description(job_description)?;

    let rendered = skills.join(", ");
    let prompt = fill_template(
        SKILLS_PROMPT_TEMPLATE,
        &[("skills", rendered.as_str()), ("job_description", jd)],
    );
    run_section(model, SKILLS_ROLE, &prompt).await
}

pub async fn analyze_projects(
    model: &dyn ChatModel,
    projects: &[Project],
    job_description: &str,
) -> Result<SectionAnalysis<ProjectFindings>, AnalysisError> {
    if projects.is_empty() {
        return Err(AnalysisError::validation("Project data is required"));
    }
    let jd = validate_job_description(job_description)?;

    let rendered = render_projects(projects);
    let prompt = fill_template(
        PROJECT_PROMPT_TEMPLATE,
        &[("projects", rendered.as_str()), ("job_description", jd)],
    );
    run_section(model, PROJECT_ROLE, &prompt).await
}

async fn run_section<T: SectionShape>(
    model: &dyn ChatModel,
    role: &str,
    prompt: &str,
) -> Result<SectionAnalysis<T>, AnalysisError> {
    let system = system_prompt(role);
    let completion = model
        .complete(ChatRequest {
            system: &system,
            user: prompt,
            temperature: SECTION_TEMPERATURE,
            max_tokens: SECTION_MAX_TOKENS,
        })
        .await?;

    let analysis = Findings::<T>::from_value(completion.json()?);
    let usage = UsageReport::from_completion(&completion);

    match analysis.score() {
        Some(score) => debug!(
            "{} analysis scored {score} ({} tokens)",
            T::SECTION.as_str(),
            usage.tokens_used
        ),
        None => warn!(
            "{} analysis returned no usable {}; it will not count toward the overall score",
            T::SECTION.as_str(),
            T::SCORE_FIELD
        ),
    }

    Ok(SectionAnalysis {
        success: true,
        analysis,
        usage,
    })
}

fn render_experiences(experiences: &[Experience]) -> String {
    experiences
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {} at {}\n   {}", i + 1, e.role, e.company, e.desc))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_projects(projects: &[Project]) -> String {
    projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p.kind.is_empty() {
                format!("{}. {}\n   {}", i + 1, p.name, p.description)
            } else {
                format!("{}. {} ({})\n   {}", i + 1, p.name, p.kind, p.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
