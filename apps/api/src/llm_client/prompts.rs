// Shared prompt fragments.
// Each feature module that calls the LLM defines its own prompts.rs alongside it;
// this file holds the cross-cutting pieces they all splice in.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// The one rule every resume-facing prompt carries.
pub const TRUTHFULNESS_RULE: &str = "\
    CRITICAL: NEVER fabricate skills, experience, employers, titles, metrics or projects. \
    You may only reword, reorder or re-emphasise content the candidate already provided. \
    If the job description asks for something the candidate does not show, report it as a gap; \
    do NOT add it to their resume.";

/// Joins a role description with the shared fragments into a full system prompt.
pub fn system_prompt(role: &str) -> String {
    format!("{role}\n\n{TRUTHFULNESS_RULE}\n\n{JSON_ONLY_SYSTEM}")
}

/// Fills `{name}` placeholders in a single pass over the template.
///
/// Substituted values are never re-scanned, so user text containing `{job_description}`
/// or similar stays literal. Braces that do not name a variable are copied through.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
