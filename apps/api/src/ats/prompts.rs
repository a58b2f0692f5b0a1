// ATS rubric prompt. The category ceilings are spliced in from `ats::models` so the prompt
// and the rubric checks cannot drift apart.

use crate::ats::models::{
    EXPERIENCE_RELEVANCE_MAX, FORMATTING_MAX, IMPACT_MAX, KEYWORD_MATCH_MAX, OVERALL_MAX,
    SKILLS_ALIGNMENT_MAX,
};
use crate::llm_client::prompts::fill_template;

pub const ATS_TEMPERATURE: f32 = 0.2;
pub const ATS_MAX_TOKENS: u32 = 2000;

pub const ATS_ROLE: &str = "You are an applicant tracking system (ATS) evaluator. \
    You score resumes against job descriptions exactly as a keyword-driven screening system would. \
    Be conservative and rule-driven: award points only for evidence present in the resume text.";

/// Replace: {keyword_match_max}, {experience_relevance_max}, {skills_alignment_max},
/// {formatting_max}, {impact_max}, {overall_max}
const RUBRIC_TEMPLATE: &str = r#"SCORING RUBRIC (points, integers only):
- keyword_match (0-{keyword_match_max}): JD keywords and phrases that appear in the resume.
- experience_relevance (0-{experience_relevance_max}): how directly past roles map to the JD's responsibilities.
- skills_alignment (0-{skills_alignment_max}): required and preferred skills the resume demonstrates.
- formatting (0-{formatting_max}): parseable structure, standard section headers, no tables or graphics.
- impact (0-{impact_max}): quantified achievements and outcomes.

overall_score (0-{overall_max}) MUST equal the sum of the five category scores.
overall_fit: "Excellent" for 85+, "Good" for 70-84, "Fair" for 50-69, "Poor" below 50."#;

/// Replace: {rubric}, {resume_text}, {job_description}
const ATS_PROMPT_TEMPLATE: &str = r#"Score this resume against the job description.

{rubric}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "overall_score": 0,
  "category_scores": {
    "keyword_match": 0,
    "experience_relevance": 0,
    "skills_alignment": 0,
    "formatting": 0,
    "impact": 0
  },
  "missing_keywords": ["important JD keywords absent from the resume"],
  "matched_keywords": ["JD keywords found in the resume"],
  "format_issues": ["anything that would trip up an ATS parser"],
  "improvement_suggestions": ["specific, truthful changes to raise the score"],
  "strengths": ["what already scores well"],
  "overall_fit": "Poor | Fair | Good | Excellent"
}"#;

pub fn rubric_text() -> String {
    let ceilings = [
        KEYWORD_MATCH_MAX.to_string(),
        EXPERIENCE_RELEVANCE_MAX.to_string(),
        SKILLS_ALIGNMENT_MAX.to_string(),
        FORMATTING_MAX.to_string(),
        IMPACT_MAX.to_string(),
        OVERALL_MAX.to_string(),
    ];
    fill_template(
        RUBRIC_TEMPLATE,
        &[
            ("keyword_match_max", ceilings[0].as_str()),
            ("experience_relevance_max", ceilings[1].as_str()),
            ("skills_alignment_max", ceilings[2].as_str()),
            ("formatting_max", ceilings[3].as_str()),
            ("impact_max", ceilings[4].as_str()),
            ("overall_max", ceilings[5].as_str()),
        ],
    )
}

pub fn ats_prompt(resume_text: &str, job_description: &str) -> String {
    let rubric = rubric_text();
    fill_template(
        ATS_PROMPT_TEMPLATE,
        &[
            ("rubric", rubric.as_str()),
            ("resume_text", resume_text),
            ("job_description", job_description),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_carries_every_ceiling() {
        let rubric = rubric_text();
        assert!(rubric.contains("keyword_match (0-30)"));
        assert!(rubric.contains("experience_relevance (0-25)"));
        assert!(rubric.contains("skills_alignment (0-20)"));
        assert!(rubric.contains("formatting (0-15)"));
        assert!(rubric.contains("impact (0-10)"));
        assert!(rubric.contains("overall_score (0-100)"));
    }

    #[test]
    fn test_prompt_keeps_user_braces_literal() {
        let prompt = ats_prompt("Built {rubric} parser", "Go role");
        assert!(prompt.contains("Built {rubric} parser"));
        assert!(prompt.contains("SCORING RUBRIC"));
        assert!(prompt.contains("\"overall_fit\""));
    }
}
