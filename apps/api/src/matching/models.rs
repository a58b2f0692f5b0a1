//! Data models for resume-to-JD matching.
//!
//! Section findings are LLM-defined JSON. They are stored and returned exactly as the
//! model sent them; each section also gets a lenient typed view for the aggregator.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::llm_client::pricing::{serialize_usd, UsageReport};

// ────────────────────────────────────────────────────────────────────────────
// Input
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

/// Resume content supplied by the caller. Every section is optional; `null` means absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experiences: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ResumeContent {
    /// The summary, trimmed, if it has any content.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.summary_text().is_none()
            && self.experiences.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections and their findings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Experiences,
    Skills,
    Projects,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Experiences => "experiences",
            Section::Skills => "skills",
            Section::Projects => "projects",
        }
    }
}

/// A typed section response with one headline score.
pub trait SectionShape: DeserializeOwned {
    const SECTION: Section;
    /// Name of the score field in the response JSON.
    const SCORE_FIELD: &'static str;
}

/// A score is usable only when it is a finite number in [0, 100].
pub fn usable_score(raw: Option<f64>) -> Option<f64> {
    raw.filter(|s| s.is_finite() && (0.0..=100.0).contains(s))
}

/// LLM output for one section.
///
/// The model's JSON is kept as sent and is what gets serialized. The headline score is
/// read from that JSON directly, so a malformed nested field never hides a valid score.
/// `shape` is the typed view, absent only when the response is not a JSON object.
#[derive(Debug, Clone)]
pub struct Findings<T> {
    raw: Value,
    shape: Option<T>,
    score: Option<f64>,
}

impl<T: SectionShape> Findings<T> {
    pub fn from_value(raw: Value) -> Self {
        let score = usable_score(raw.get(T::SCORE_FIELD).and_then(Value::as_f64));
        let shape = serde_json::from_value::<T>(raw.clone()).ok();
        Findings { raw, shape, score }
    }

    pub fn structured(&self) -> Option<&T> {
        self.shape.as_ref()
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }
}

impl<T> Serialize for Findings<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Reads a field leniently: `null` or a value of the wrong type becomes the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

// The typed views mirror the full prompt schemas; the aggregator reads only a few fields.

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryFindings {
    #[serde(deserialize_with = "lenient")]
    pub aligned_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub missing_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub improvements: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub enhanced_summary: Option<String>,
}

impl SectionShape for SummaryFindings {
    const SECTION: Section = Section::Summary;
    const SCORE_FIELD: &'static str = "matchScore";
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceFit {
    #[serde(deserialize_with = "lenient")]
    pub role: String,
    #[serde(deserialize_with = "lenient")]
    pub company: String,
    #[serde(deserialize_with = "lenient")]
    pub relevance_score: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub matching_points: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub suggested_bullets: Vec<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceFindings {
    #[serde(deserialize_with = "lenient")]
    pub experience_analysis: Vec<ExperienceFit>,
    #[serde(deserialize_with = "lenient")]
    pub transferable_skills: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub gaps: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub recommendations: Vec<String>,
}

impl SectionShape for ExperienceFindings {
    const SECTION: Section = Section::Experiences;
    const SCORE_FIELD: &'static str = "overallExperienceMatch";
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillGap {
    #[serde(deserialize_with = "lenient")]
    pub skill: String,
    #[serde(deserialize_with = "lenient")]
    pub importance: String,
    #[serde(deserialize_with = "lenient")]
    pub suggestion: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillsFindings {
    #[serde(deserialize_with = "lenient")]
    pub matched_skills: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub related_skills: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub missing_skills: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub recommended_order: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub skill_gaps: Vec<SkillGap>,
}

impl SectionShape for SkillsFindings {
    const SECTION: Section = Section::Skills;
    const SCORE_FIELD: &'static str = "matchPercentage";
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFit {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub relevance_score: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub highlighted_technologies: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub suggested_description: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFindings {
    #[serde(deserialize_with = "lenient")]
    pub project_analysis: Vec<ProjectFit>,
    #[serde(deserialize_with = "lenient")]
    pub recommended_order: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub recommendations: Vec<String>,
}

impl SectionShape for ProjectFindings {
    const SECTION: Section = Section::Projects;
    const SCORE_FIELD: &'static str = "overallProjectMatch";
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// Result of one section analyzer call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct SectionAnalysis<T> {
    pub success: bool,
    pub analysis: Findings<T>,
    #[serde(flatten)]
    pub usage: UsageReport,
}

/// Per-section results. Sections that were not attempted are `None` (`null` on the wire).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionAnalyses {
    pub summary: Option<SectionAnalysis<SummaryFindings>>,
    pub experiences: Option<SectionAnalysis<ExperienceFindings>>,
    pub skills: Option<SectionAnalysis<SkillsFindings>>,
    pub projects: Option<SectionAnalysis<ProjectFindings>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchingInsights {
    pub strengths: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub overall_match_score: u8,
    pub analyses: SectionAnalyses,
    pub total_tokens: u32,
    #[serde(serialize_with = "serialize_usd")]
    pub estimated_cost: f64,
    pub matching_insights: MatchingInsights,
}
