// Product lookup: resolves a typed name, URL, or photo into structured product metadata.
// All LLM calls go through llm_client::ModelGateway.

pub mod handlers;
pub mod lookup;
pub mod models;
pub mod prompts;
