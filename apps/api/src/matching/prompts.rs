// Prompt constants for the section analyzers.
// System prompts are built with `llm_client::prompts::system_prompt`, which appends the
// truthfulness rule and the JSON-only instruction to the role text below.

pub const SECTION_TEMPERATURE: f32 = 0.3;
pub const SECTION_MAX_TOKENS: u32 = 1500;

pub const SUMMARY_ROLE: &str = "You are an expert resume summary analyst. \
    You compare a candidate's professional summary against a job description and explain \
    how well it positions the candidate for that role.";

/// Replace: {summary}, {job_description}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Analyze how well this professional summary matches the job description.

PROFESSIONAL SUMMARY:
{summary}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "matchScore": 0,
  "alignedKeywords": ["keywords from the JD already present in the summary"],
  "missingKeywords": ["important JD keywords absent from the summary"],
  "strengths": ["what the summary already does well for this role"],
  "improvements": ["specific, truthful edits that would improve alignment"],
  "enhancedSummary": "a rewritten summary using ONLY facts present in the original"
}

matchScore is an integer from 0 to 100."#;

pub const EXPERIENCE_ROLE: &str = "You are an expert resume experience analyst. \
    You assess how relevant each position in a candidate's work history is to a job description.";

/// Replace: {experiences}, {job_description}
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Analyze how well this work experience matches the job description.

WORK EXPERIENCE:
{experiences}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "overallExperienceMatch": 0,
  "experienceAnalysis": [
    {
      "role": "role exactly as given",
      "company": "company exactly as given",
      "relevanceScore": 0,
      "matchingPoints": ["JD requirements this position demonstrates"],
      "suggestedBullets": ["reworded bullets using ONLY facts from this position"]
    }
  ],
  "transferableSkills": ["skills shown in the experience that carry over to this role"],
  "gaps": ["JD requirements not covered by any position"],
  "recommendations": ["how to reorder or re-emphasise existing experience"]
}

overallExperienceMatch and every relevanceScore are integers from 0 to 100.
Include one experienceAnalysis entry per position, in the order given."#;

pub const SKILLS_ROLE: &str = "You are an expert resume skills analyst. \
    You match a candidate's listed skills against the skills a job description requires.";

/// Replace: {skills}, {job_description}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Analyze how well this skills list matches the job description.

CANDIDATE SKILLS:
{skills}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "matchPercentage": 0,
  "matchedSkills": ["candidate skills the JD asks for"],
  "relatedSkills": ["candidate skills adjacent to JD requirements"],
  "missingSkills": ["JD skills the candidate does not list"],
  "recommendedOrder": ["the candidate's OWN skills, reordered by relevance to this JD"],
  "skillGaps": [
    {"skill": "missing skill", "importance": "high | medium | low", "suggestion": "how to close the gap"}
  ]
}

matchPercentage is an integer from 0 to 100.
recommendedOrder may only contain skills from the candidate's list."#;

pub const PROJECT_ROLE: &str = "You are an expert resume project analyst. \
    You judge which of a candidate's projects best demonstrate fit for a job description.";

/// Replace: {projects}, {job_description}
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"Analyze how well these projects match the job description.

PROJECTS:
{projects}

JOB DESCRIPTION:
{job_description}

Return a JSON object with this EXACT schema:
{
  "overallProjectMatch": 0,
  "projectAnalysis": [
    {
      "name": "project name exactly as given",
      "relevanceScore": 0,
      "highlightedTechnologies": ["technologies from the project relevant to the JD"],
      "suggestedDescription": "a reworded description using ONLY facts from the project"
    }
  ],
  "recommendedOrder": ["project names ordered by relevance"],
  "recommendations": ["how to present the existing projects for this role"]
}

overallProjectMatch and every relevanceScore are integers from 0 to 100."#;
