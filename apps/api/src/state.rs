use std::sync::Arc;

use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-session data: each lookup or generation works only on its own request.
#[derive(Clone)]
pub struct AppState {
    /// Model gateway. `LlmClient` in production, a scripted gateway in tests.
    pub llm: Arc<dyn ModelGateway>,
}
