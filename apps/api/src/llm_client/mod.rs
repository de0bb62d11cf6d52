/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the model service directly.
/// Product lookup and content generation go through `ModelGateway`.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub mod extract;
pub mod lenient;
pub mod media;
pub mod prompts;
#[cfg(test)]
pub mod testing;

/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication rejected (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Quota exhausted or rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Request / response model
// ────────────────────────────────────────────────────────────────────────────

/// An inline binary attachment, already base64-encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPart {
    pub data: String,
    pub media_type: String,
}

/// A single-shot request to the model. Built by the prompt builders, consumed by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub instruction_text: String,
    /// Sent ahead of the instruction text (e.g. the product photo).
    pub attached_parts: Vec<BinaryPart>,
    pub use_web_grounding: bool,
    pub temperature: f32,
    pub top_p: Option<f32>,
    /// Ask the service for `application/json` output.
    pub structured_output: bool,
}

impl ModelRequest {
    #[must_use]
    pub fn new(instruction_text: impl Into<String>) -> Self {
        Self {
            instruction_text: instruction_text.into(),
            attached_parts: Vec::new(),
            use_web_grounding: false,
            temperature: 1.0,
            top_p: None,
            structured_output: false,
        }
    }

    #[must_use]
    pub fn with_part(mut self, part: BinaryPart) -> Self {
        self.attached_parts.push(part);
        self
    }

    #[must_use]
    pub fn with_web_grounding(mut self) -> Self {
        self.use_web_grounding = true;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    #[must_use]
    pub fn with_structured_output(mut self) -> Self {
        self.structured_output = true;
        self
    }
}

/// A web source the model cited while grounding its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Raw model output. Parsing is the caller's job (see `extract`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub raw_text: String,
    pub citations: Vec<Citation>,
}

/// Seam between the orchestrators and the model service.
/// Carried in `AppState` as `Arc<dyn ModelGateway>`.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<GroundingChunkWeb>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunkWeb {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Maps a `ModelRequest` onto the Gemini `generateContent` body.
/// Attached parts go first, then the instruction text.
fn build_request_body(request: &ModelRequest) -> GeminiRequest<'_> {
    let mut parts: Vec<WirePart<'_>> = request
        .attached_parts
        .iter()
        .map(|part| WirePart::InlineData {
            inline_data: InlineData {
                mime_type: &part.media_type,
                data: &part.data,
            },
        })
        .collect();
    parts.push(WirePart::Text {
        text: &request.instruction_text,
    });

    let tools = if request.use_web_grounding {
        vec![GeminiTool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GeminiRequest {
        system_instruction: GeminiContent {
            role: None,
            parts: vec![WirePart::Text {
                text: JSON_ONLY_SYSTEM,
            }],
        },
        contents: vec![GeminiContent {
            role: Some("user"),
            parts,
        }],
        tools,
        generation_config: GenerationConfig {
            temperature: request.temperature,
            top_p: request.top_p,
            response_mime_type: request.structured_output.then_some(JSON_MIME_TYPE),
        },
    }
}

impl GeminiResponse {
    /// Concatenates the text parts of the first candidate and collects its web citations.
    fn into_model_response(self) -> ModelResponse {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            warn!("Gemini blocked the prompt: {reason}");
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return ModelResponse::default();
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != "STOP" {
                warn!("Gemini finished with reason {reason}");
            }
        }

        let raw_text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let citations = candidate
            .grounding_metadata
            .map(|m| {
                m.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        let uri = web.uri?;
                        let title = web.title.unwrap_or_else(|| uri.clone());
                        Some(Citation { uri, title })
                    })
                    .collect()
            })
            .unwrap_or_default();

        ModelResponse {
            raw_text,
            citations,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The Gemini-backed `ModelGateway` used by the running service.
///
/// No retries: upstream failures are surfaced to the caller as-is.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/v1beta/models/{MODEL}:generateContent",
                api_base.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl ModelGateway for LlmClient {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, LlmError> {
        let body = build_request_body(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {status}: {message}");
            return Err(classify_failure(status, message));
        }

        let gemini_response: GeminiResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}, grounded={}",
                usage.prompt_token_count, usage.candidates_token_count, request.use_web_grounding
            );
        }

        Ok(gemini_response.into_model_response())
    }
}

fn classify_failure(status: StatusCode, message: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { message },
        _ => LlmError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(request: &ModelRequest) -> serde_json::Value {
        serde_json::to_value(build_request_body(request)).unwrap()
    }

    #[test]
    fn test_request_body_places_attachments_before_instruction() {
        let request = ModelRequest::new("Describe this product").with_part(BinaryPart {
            data: "aGVsbG8=".to_string(),
            media_type: "image/webp".to_string(),
        });
        let json = body_json(&request);

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/webp");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[1]["text"], "Describe this product");
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn test_request_body_always_carries_json_only_system_instruction() {
        let json = body_json(&ModelRequest::new("anything"));
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], JSON_ONLY_SYSTEM);
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_grounding_adds_google_search_tool() {
        let grounded = body_json(&ModelRequest::new("q").with_web_grounding());
        assert_eq!(grounded["tools"][0]["google_search"], serde_json::json!({}));

        let plain = body_json(&ModelRequest::new("q"));
        assert!(plain.get("tools").is_none());
    }

    #[test]
    fn test_structured_output_sets_response_mime_type() {
        let json = body_json(
            &ModelRequest::new("q")
                .with_temperature(0.8)
                .with_top_p(0.95)
                .with_structured_output(),
        );
        let config = &json["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert!((config["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert!((config["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);

        let plain = body_json(&ModelRequest::new("q").with_temperature(0.2));
        assert!(plain["generationConfig"].get("responseMimeType").is_none());
        assert!(plain["generationConfig"].get("topP").is_none());
    }

    #[test]
    fn test_response_collects_text_and_web_citations() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"name\":"}, {"text": "\"X\"}"}]},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://cekbpom.pom.go.id/x", "title": "cekbpom"}},
                        {"retrievedContext": {"uri": "ignored"}},
                        {"web": {"uri": "https://example.com"}}
                    ]
                }
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let response = parsed.into_model_response();

        assert_eq!(response.raw_text, "{\"name\":\"X\"}");
        assert_eq!(
            response.citations,
            vec![
                Citation {
                    uri: "https://cekbpom.pom.go.id/x".to_string(),
                    title: "cekbpom".to_string(),
                },
                Citation {
                    uri: "https://example.com".to_string(),
                    title: "https://example.com".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_response_without_candidates_is_empty_text() {
        let parsed: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        let response = parsed.into_model_response();
        assert!(response.raw_text.is_empty());
        assert!(response.citations.is_empty());
    }

    #[test]
    fn test_classify_failure_maps_auth_and_quota() {
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, "bad key".into()),
            LlmError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, "quota".into()),
            LlmError::RateLimited { .. }
        ));
        assert!(matches!(
            classify_failure(StatusCode::BAD_GATEWAY, "down".into()),
            LlmError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn test_client_endpoint_trims_trailing_slash() {
        let client = LlmClient::new("key".to_string(), "https://example.test/").unwrap();
        assert_eq!(
            client.endpoint,
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
