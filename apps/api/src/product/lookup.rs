//! Product Lookup — resolves a `ProductQuery` into `ProductInfo`.
//!
//! Flow: validate query → build prompt (encode image first) → gateway call →
//!       extract JSON → validate name/fungsi → merge grounding citations.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::extract::extract_object;
use crate::llm_client::media::{encode_image, EncodingError};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_REMINDER};
use crate::llm_client::{LlmError, ModelGateway, ModelRequest};
use crate::product::models::{
    ProductCandidate, ProductInfo, ProductQuery, REGISTRATION_NOT_APPLICABLE,
    REGISTRATION_NOT_FOUND,
};
use crate::product::prompts::{
    LOOKUP_BY_IMAGE_TEMPLATE, LOOKUP_BY_NAME_TEMPLATE, LOOKUP_BY_URL_TEMPLATE,
    LOOKUP_TEMPERATURE, PRODUCT_SCHEMA_INSTRUCTION,
};

/// Raw model output included in warnings is cut to this many characters.
const RAW_SAMPLE_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid product query: {0}")]
    Input(String),

    #[error("Could not process the product image: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Model service call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("The model response did not contain readable product data")]
    Extraction,

    #[error("The model response is missing product fields: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Runs a single product lookup against the model.
///
/// Citations come from the gateway's grounding metadata, not from the parsed JSON.
pub async fn lookup_product(
    gateway: &dyn ModelGateway,
    query: &ProductQuery,
) -> Result<ProductInfo, LookupError> {
    validate_query(query)?;

    let request = build_lookup_request(query)?;
    info!("Looking up product by {}", query.kind());

    let response = gateway.generate(&request).await?;

    let Some(object) = extract_object(&response.raw_text) else {
        warn!(
            "Lookup response had no JSON object: {:?}",
            raw_sample(&response.raw_text)
        );
        return Err(LookupError::Extraction);
    };

    let candidate: ProductCandidate = serde_json::from_value(Value::Object(object))
        .map_err(|e| {
            warn!("Lookup response could not be read as a product: {e}");
            LookupError::Extraction
        })?;

    let mut product = candidate.validate().map_err(|missing| {
        warn!(
            "Lookup response missing {:?}: {:?}",
            missing,
            raw_sample(&response.raw_text)
        );
        LookupError::Validation(missing)
    })?;

    product.sources = response.citations;

    info!(
        "Resolved product {:?} with {} grounding sources",
        product.name,
        product.sources.len()
    );

    Ok(product)
}

fn validate_query(query: &ProductQuery) -> Result<(), LookupError> {
    match query {
        ProductQuery::Name(text) if text.trim().is_empty() => Err(LookupError::Input(
            "Product name cannot be empty".to_string(),
        )),
        ProductQuery::Url(text) if text.trim().is_empty() => Err(LookupError::Input(
            "Product URL cannot be empty".to_string(),
        )),
        ProductQuery::Image { bytes, .. } if bytes.is_empty() => Err(LookupError::Input(
            "Product image cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Builds the grounded, low-temperature lookup request for a query.
pub fn build_lookup_request(query: &ProductQuery) -> Result<ModelRequest, EncodingError> {
    let schema_instruction = PRODUCT_SCHEMA_INSTRUCTION
        .replace("{not_found}", REGISTRATION_NOT_FOUND)
        .replace("{not_applicable}", REGISTRATION_NOT_APPLICABLE);

    let fill = |template: &str, query: &str| {
        fill_template(
            template,
            &[
                ("schema_instruction", schema_instruction.as_str()),
                ("json_only_reminder", JSON_ONLY_REMINDER),
                ("query", query),
            ],
        )
    };

    let request = match query {
        ProductQuery::Name(text) => ModelRequest::new(fill(LOOKUP_BY_NAME_TEMPLATE, text)),
        ProductQuery::Url(text) => ModelRequest::new(fill(LOOKUP_BY_URL_TEMPLATE, text)),
        ProductQuery::Image { bytes, media_type } => {
            let image = encode_image(bytes, media_type)?;
            ModelRequest::new(fill(LOOKUP_BY_IMAGE_TEMPLATE, "")).with_part(image)
        }
    };

    Ok(request
        .with_web_grounding()
        .with_temperature(LOOKUP_TEMPERATURE))
}

fn raw_sample(raw: &str) -> String {
    raw.chars().take(RAW_SAMPLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::llm_client::testing::ScriptedGateway;
    use crate::llm_client::Citation;

    fn name_query() -> ProductQuery {
        ProductQuery::Name("Vitamin C Serum".to_string())
    }

    #[test]
    fn test_text_queries_appear_verbatim_in_prompt() {
        let queries = [
            "Vitamin C Serum",
            "Sabun \"Cuci\" Muka {extra} 100ml — édition",
            "https://shopee.co.id/product/123?ref={schema_instruction}&q=a%20b",
        ];
        for text in queries {
            for query in [
                ProductQuery::Name(text.to_string()),
                ProductQuery::Url(text.to_string()),
            ] {
                let request = build_lookup_request(&query).unwrap();
                assert!(
                    request.instruction_text.contains(text),
                    "prompt for {query:?} lost the query text"
                );
            }
        }
    }

    #[test]
    fn test_lookup_request_is_grounded_and_factual() {
        let request = build_lookup_request(&name_query()).unwrap();
        assert!(request.use_web_grounding);
        assert!((request.temperature - LOOKUP_TEMPERATURE).abs() < f32::EPSILON);
        assert!(!request.structured_output);
        assert!(request.attached_parts.is_empty());
        for key in ["\"name\"", "\"fungsi\"", "\"nomorBPOM\"", REGISTRATION_NOT_FOUND] {
            assert!(request.instruction_text.contains(key), "schema lacks {key}");
        }
        assert!(!request.instruction_text.contains("{schema_instruction}"));
    }

    #[test]
    fn test_lookup_request_is_deterministic() {
        let a = build_lookup_request(&name_query()).unwrap();
        let b = build_lookup_request(&name_query()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_request_carries_encoded_part_with_exact_media_type() {
        let query = ProductQuery::Image {
            bytes: Bytes::from_static(&[0x89, b'P', b'N', b'G']),
            media_type: "image/png".to_string(),
        };
        let request = build_lookup_request(&query).unwrap();

        assert!(request.use_web_grounding);
        match request.attached_parts.as_slice() {
            [part] => {
                assert_eq!(part.media_type, "image/png");
                assert_eq!(part.data, "iVBORw==");
            }
            other => panic!("expected one binary part, got {other:?}"),
        }
        assert!(request.instruction_text.contains("\"nomorBPOM\""));
    }

    #[tokio::test]
    async fn test_fenced_json_resolves_product() {
        let gateway = ScriptedGateway::replying(
            "```json\n{\"name\":\"Vitamin C Serum 20%\",\"fungsi\":\"Mencerahkan kulit\",\"nomorBPOM\":\"NA18221234567\"}\n```",
        );

        let product = lookup_product(&gateway, &name_query()).await.unwrap();

        assert_eq!(
            product,
            ProductInfo {
                name: "Vitamin C Serum 20%".to_string(),
                function: "Mencerahkan kulit".to_string(),
                registration_number: "NA18221234567".to_string(),
                sources: vec![],
            }
        );
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_prose_only_reply_is_extraction_failure() {
        let gateway =
            ScriptedGateway::replying("Maaf, saya tidak menemukan informasi produk tersebut.");
        let err = lookup_product(&gateway, &name_query()).await.unwrap_err();
        assert!(matches!(err, LookupError::Extraction));
    }

    #[tokio::test]
    async fn test_missing_name_is_validation_failure() {
        let gateway = ScriptedGateway::replying(r#"{"name": "", "fungsi": "X"}"#);
        let err = lookup_product(&gateway, &name_query()).await.unwrap_err();
        match err {
            LookupError::Validation(missing) => assert_eq!(missing, vec!["name".to_string()]),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_text_required_fields_are_validation_failure() {
        let gateway = ScriptedGateway::replying(r#"{"name": {"id": 42}, "fungsi": null}"#);
        let err = lookup_product(&gateway, &name_query()).await.unwrap_err();
        match err {
            LookupError::Validation(missing) => {
                assert_eq!(missing, vec!["name".to_string(), "fungsi".to_string()])
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_numeric_registration_number_still_resolves() {
        let gateway =
            ScriptedGateway::replying(r#"{"name":"X","fungsi":"Y","nomorBPOM":18221234567}"#);
        let product = lookup_product(&gateway, &name_query()).await.unwrap();
        assert_eq!(product.name, "X");
        assert_eq!(product.function, "Y");
        assert_eq!(product.registration_number, "18221234567");
    }

    #[tokio::test]
    async fn test_structured_registration_number_defaults_to_not_found() {
        let gateway = ScriptedGateway::replying(
            r#"{"name":"X","fungsi":"Y","nomorBPOM":{"nomor":"NA18221234567","status":"aktif"}}"#,
        );
        let product = lookup_product(&gateway, &name_query()).await.unwrap();
        assert_eq!(product.registration_number, REGISTRATION_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_gateway_citations_are_merged_and_registration_defaulted() {
        let citations = vec![Citation {
            uri: "https://cekbpom.pom.go.id/produk/1".to_string(),
            title: "Cek BPOM".to_string(),
        }];
        let gateway = ScriptedGateway::replying_with_citations(
            r#"Hasil: {"name": "Serum", "fungsi": "Melembapkan", "sources": []}"#,
            citations.clone(),
        );

        let product = lookup_product(&gateway, &name_query()).await.unwrap();

        assert_eq!(product.sources, citations);
        assert_eq!(product.registration_number, REGISTRATION_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_propagated() {
        let gateway = ScriptedGateway::quota_exceeded();
        let err = lookup_product(&gateway, &name_query()).await.unwrap_err();
        assert!(matches!(
            err,
            LookupError::Upstream(LlmError::RateLimited { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_queries_never_reach_the_gateway() {
        let gateway = ScriptedGateway::replying("{}");
        let queries = [
            ProductQuery::Name("   ".to_string()),
            ProductQuery::Url(String::new()),
            ProductQuery::Image {
                bytes: Bytes::new(),
                media_type: "image/jpeg".to_string(),
            },
        ];
        for query in &queries {
            let err = lookup_product(&gateway, query).await.unwrap_err();
            assert!(matches!(err, LookupError::Input(_)), "{query:?}");
        }
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_image_upload_is_encoding_error() {
        let gateway = ScriptedGateway::replying("{}");
        let query = ProductQuery::Image {
            bytes: Bytes::from_static(b"%PDF-1.7"),
            media_type: "application/pdf".to_string(),
        };
        let err = lookup_product(&gateway, &query).await.unwrap_err();
        assert!(matches!(
            err,
            LookupError::Encoding(EncodingError::UnsupportedMediaType(_))
        ));
        assert_eq!(gateway.calls(), 0);
    }
}
