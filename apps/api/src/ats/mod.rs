// ATS scoring: one rubric-driven LLM call per resume, from an upload or the builder.

pub mod analyzer;
pub mod extract;
pub mod formatter;
pub mod handlers;
pub mod models;
pub mod prompts;
