//! ATS report shape and the fixed scoring rubric.

use serde::{Deserialize, Deserializer, Serialize};

/// Rubric ceilings. They sum to `OVERALL_MAX`.
pub const KEYWORD_MATCH_MAX: u32 = 30;
pub const EXPERIENCE_RELEVANCE_MAX: u32 = 25;
pub const SKILLS_ALIGNMENT_MAX: u32 = 20;
pub const FORMATTING_MAX: u32 = 15;
pub const IMPACT_MAX: u32 = 10;
pub const OVERALL_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallFit {
    #[serde(alias = "poor", alias = "POOR")]
    Poor,
    #[serde(alias = "fair", alias = "FAIR")]
    Fair,
    #[serde(alias = "good", alias = "GOOD")]
    Good,
    #[serde(alias = "excellent", alias = "EXCELLENT")]
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(deserialize_with = "points")]
    pub keyword_match: u32,
    #[serde(deserialize_with = "points")]
    pub experience_relevance: u32,
    #[serde(deserialize_with = "points")]
    pub skills_alignment: u32,
    #[serde(deserialize_with = "points")]
    pub formatting: u32,
    #[serde(deserialize_with = "points")]
    pub impact: u32,
}

impl CategoryScores {
    pub fn total(&self) -> u32 {
        self.keyword_match
            + self.experience_relevance
            + self.skills_alignment
            + self.formatting
            + self.impact
    }

    fn with_ceilings(&self) -> [(&'static str, u32, u32); 5] {
        [
            ("keyword_match", self.keyword_match, KEYWORD_MATCH_MAX),
            (
                "experience_relevance",
                self.experience_relevance,
                EXPERIENCE_RELEVANCE_MAX,
            ),
            ("skills_alignment", self.skills_alignment, SKILLS_ALIGNMENT_MAX),
            ("formatting", self.formatting, FORMATTING_MAX),
            ("impact", self.impact, IMPACT_MAX),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    #[serde(deserialize_with = "points")]
    pub overall_score: u32,
    pub category_scores: CategoryScores,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub format_issues: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    pub overall_fit: OverallFit,
}

impl AtsReport {
    /// Places where the model's numbers break the rubric. Nothing is corrected here.
    pub fn rubric_violations(&self) -> Vec<String> {
        let mut violations: Vec<String> = self
            .category_scores
            .with_ceilings()
            .iter()
            .filter(|(_, score, max)| score > max)
            .map(|(name, score, max)| format!("{name} {score} exceeds ceiling {max}"))
            .collect();

        if self.overall_score > OVERALL_MAX {
            violations.push(format!(
                "overall_score {} exceeds ceiling {OVERALL_MAX}",
                self.overall_score
            ));
        }

        let total = self.category_scores.total();
        if total != self.overall_score {
            violations.push(format!(
                "overall_score {} does not equal category sum {total}",
                self.overall_score
            ));
        }
        violations
    }
}

/// Accepts integer or float points from the model; rejects negatives and non-finite values.
fn points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 || raw > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("invalid score {raw}")));
    }
    Ok(raw.round() as u32)
}
