//! Content Generation — turns a resolved product and style preferences into a
//! complete marketing bundle.
//!
//! Flow: precondition (product name) → build prompt → gateway call →
//!       extract JSON → completeness check.
//!
//! Unlike lookup, an incomplete bundle is still handed back inside the error
//! so the caller can show what did come through.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::content::models::{ContentPreferences, GeneratedContent};
use crate::content::prompts::{
    EXPECTED_HASHTAGS, GENERATION_PROMPT_TEMPLATE, GENERATION_TEMPERATURE, GENERATION_TOP_P,
    HOOK_TYPE_BINDING, HOOK_TYPE_FREE, SCENE_MARKER,
};
use crate::llm_client::extract::extract_object;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_REMINDER};
use crate::llm_client::{LlmError, ModelGateway, ModelRequest};
use crate::product::models::ProductInfo;

/// Raw model output included in warnings is cut to this many characters.
const RAW_SAMPLE_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Precondition(String),

    #[error("Model service call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("The model response did not contain readable content")]
    Extraction,

    #[error("Generated content is incomplete: {}", .problems.join(", "))]
    Validation {
        problems: Vec<String>,
        /// Whatever the model did produce.
        partial: Box<GeneratedContent>,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates the marketing bundle for a resolved product.
///
/// Fails with `Precondition` before any model call when the product has no name.
pub async fn generate_content(
    gateway: &dyn ModelGateway,
    product: &ProductInfo,
    preferences: &ContentPreferences,
) -> Result<GeneratedContent, GenerationError> {
    if product.name.trim().is_empty() {
        return Err(GenerationError::Precondition(
            "Product information is not available. Look up the product before generating content."
                .to_string(),
        ));
    }

    let request = build_generation_request(product, preferences);
    info!(
        "Generating content for {:?}: style={:?}, voice_over={:?}, hook={:?}, duration={:?}",
        product.name,
        preferences.general_style,
        preferences.voice_over_style,
        preferences.hook_type,
        preferences.target_duration
    );

    let response = gateway.generate(&request).await?;

    let Some(object) = extract_object(&response.raw_text) else {
        warn!(
            "Generation response had no JSON object: {:?}",
            raw_sample(&response.raw_text)
        );
        return Err(GenerationError::Extraction);
    };

    let content: GeneratedContent =
        serde_json::from_value(Value::Object(object)).map_err(|e| {
            warn!("Generation response could not be read as content: {e}");
            GenerationError::Extraction
        })?;

    let missing = content.missing_required_fields();
    if !missing.is_empty() {
        warn!(
            "Generation response missing {:?}: {:?}",
            missing,
            raw_sample(&response.raw_text)
        );
        return Err(GenerationError::Validation {
            problems: missing.into_iter().map(|f| format!("{f} is empty")).collect(),
            partial: Box::new(content),
        });
    }

    // Soft constraints: flagged, never rejected.
    let hashtag_count = content.hashtag_count();
    if hashtag_count != EXPECTED_HASHTAGS {
        warn!("Generated {hashtag_count} hashtags (asked for {EXPECTED_HASHTAGS})");
    }
    if !content.voice_over_script.contains(SCENE_MARKER) {
        warn!("Voice-over script has no {SCENE_MARKER} markers");
    }

    info!(
        "Generated content for {:?}: {} hooks, {} thumbnail titles",
        product.name,
        content.hooks.len(),
        content.thumbnail_titles.len()
    );

    Ok(content)
}

/// Builds the creative, structured-output generation request.
pub fn build_generation_request(
    product: &ProductInfo,
    preferences: &ContentPreferences,
) -> ModelRequest {
    let hook_instruction = match preferences.hook_type {
        Some(hook_type) => HOOK_TYPE_BINDING.replace("{hook_type}", hook_type.label()),
        None => HOOK_TYPE_FREE.to_string(),
    };

    let prompt = fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("product_name", product.name.as_str()),
            ("product_function", product.function.as_str()),
            ("registration_number", product.registration_number.as_str()),
            ("duration", preferences.target_duration.label()),
            ("general_style", preferences.general_style.label()),
            ("voice_over_style", preferences.voice_over_style.label()),
            ("hook_instruction", hook_instruction.as_str()),
            ("json_only_reminder", JSON_ONLY_REMINDER),
        ],
    );

    ModelRequest::new(prompt)
        .with_temperature(GENERATION_TEMPERATURE)
        .with_top_p(GENERATION_TOP_P)
        .with_structured_output()
}

fn raw_sample(raw: &str) -> String {
    raw.chars().take(RAW_SAMPLE_CHARS).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
