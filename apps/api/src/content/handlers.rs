//! Axum route handlers for the Content Generation API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::content::export::{export_filename, render_text_bundle};
use crate::content::generator::generate_content;
use crate::content::models::{
    ContentPreferences, GeneratedContent, HookType, LanguageStyle, VideoDuration,
};
use crate::errors::AppError;
use crate::product::models::ProductInfo;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub product: ProductInfo,
    #[serde(default)]
    pub preferences: ContentPreferences,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: serde_json::Value,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub general_styles: Vec<OptionEntry>,
    pub voice_over_styles: Vec<OptionEntry>,
    pub hook_types: Vec<OptionEntry>,
    pub durations: Vec<OptionEntry>,
    pub defaults: ContentPreferences,
}

fn entry<T: Serialize>(value: T, label: &'static str) -> OptionEntry {
    OptionEntry {
        value: serde_json::to_value(value).unwrap_or_default(),
        label,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/content/generate
///
/// Generates the full marketing bundle for an already-resolved product.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    let content =
        generate_content(state.llm.as_ref(), &request.product, &request.preferences).await?;
    Ok(Json(content))
}

/// POST /api/v1/content/export
///
/// Renders a bundle as a downloadable plain-text file.
pub async fn handle_export(Json(content): Json<GeneratedContent>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&content));
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_text_bundle(&content),
    )
        .into_response()
}

/// GET /api/v1/options
///
/// Style vocabularies with their display labels, plus the default preferences.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        general_styles: LanguageStyle::GENERAL
            .iter()
            .map(|s| entry(s, s.label()))
            .collect(),
        voice_over_styles: LanguageStyle::VOICE_OVER
            .iter()
            .map(|s| entry(s, s.label()))
            .collect(),
        hook_types: HookType::ALL.iter().map(|h| entry(h, h.label())).collect(),
        durations: VideoDuration::ALL
            .iter()
            .map(|d| entry(d, d.label()))
            .collect(),
        defaults: ContentPreferences::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults_preferences() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{"product": {"name": "Serum X", "fungsi": "Mencerahkan", "nomorBPOM": "NA18201234567"}}"#,
        )
        .unwrap();
        assert_eq!(request.product.name, "Serum X");
        assert_eq!(request.preferences, ContentPreferences::default());
    }

    #[tokio::test]
    async fn test_options_list_every_vocabulary() {
        let Json(options) = handle_options().await;
        assert_eq!(options.general_styles.len(), 6);
        assert_eq!(options.voice_over_styles.len(), 7);
        assert_eq!(options.hook_types.len(), 9);
        assert_eq!(
            options.durations[0],
            OptionEntry {
                value: serde_json::json!("SEC_15"),
                label: "15 Detik",
            }
        );
        assert_eq!(
            options.voice_over_styles[0].value,
            serde_json::json!("NATIVE_STORYTELLING_HUMOR")
        );
    }

    #[tokio::test]
    async fn test_export_sets_attachment_headers() {
        let content = GeneratedContent {
            caption: "Glow up".to_string(),
            ..GeneratedContent::default()
        };
        let response = handle_export(Json(content)).await;
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Seluruh_Konten_Afiliasi_Glow_up.txt\""
        );
    }
}
