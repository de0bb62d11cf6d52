//! Scripted `ModelGateway` for orchestrator tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{Citation, LlmError, ModelGateway, ModelRequest, ModelResponse};

enum Reply {
    Text {
        raw_text: String,
        citations: Vec<Citation>,
    },
    QuotaExceeded,
}

/// Returns a fixed reply and records every request it receives.
pub struct ScriptedGateway {
    reply: Reply,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedGateway {
    pub fn replying(raw_text: &str) -> Self {
        Self::replying_with_citations(raw_text, Vec::new())
    }

    pub fn replying_with_citations(raw_text: &str, citations: Vec<Citation>) -> Self {
        Self {
            reply: Reply::Text {
                raw_text: raw_text.to_string(),
                citations,
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn quota_exceeded() -> Self {
        Self {
            reply: Reply::QuotaExceeded,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ModelRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text {
                raw_text,
                citations,
            } => Ok(ModelResponse {
                raw_text: raw_text.clone(),
                citations: citations.clone(),
            }),
            Reply::QuotaExceeded => Err(LlmError::RateLimited {
                message: "Resource has been exhausted".to_string(),
            }),
        }
    }
}
