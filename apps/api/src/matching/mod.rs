// Resume-to-JD matching: four section analyzers fanned out by one aggregator.
// All LLM calls go through llm_client::ChatModel; no direct provider calls here.

pub mod aggregator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sections;
