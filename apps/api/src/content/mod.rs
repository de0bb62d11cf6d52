// Content generation: style-conditioned marketing copy for a resolved product, plus text export.
// All LLM calls go through llm_client::ModelGateway.

pub mod export;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
