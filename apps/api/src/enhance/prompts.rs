pub const ENHANCE_TEMPERATURE: f32 = 0.7;
pub const ENHANCE_MAX_TOKENS: u32 = 800;

pub const ENHANCE_ROLE: &str = "You are a professional resume summary writer. \
    You tighten and sharpen a candidate's own summary without changing what it claims.";

/// Replace: {summary}, {target_role}
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Rewrite this professional summary so it reads stronger for the target role.

CURRENT SUMMARY:
{summary}

TARGET ROLE:
{target_role}

Keep it to 3-4 sentences. Use active voice and concrete language.

Return a JSON object with this EXACT schema:
{
  "enhancedSummary": "the rewritten summary",
  "keyChanges": ["short description of each change made"]
}"#;

/// Used when the caller gives no target role.
pub const ANY_ROLE: &str = "Not specified; keep the summary general.";
