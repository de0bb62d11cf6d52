//! Axum route handlers for the Product Lookup API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::media::EncodingError;
use crate::product::lookup::{lookup_product, LookupError};
use crate::product::models::{ProductInfo, ProductQuery};
use crate::state::AppState;

/// Multipart field carrying the uploaded file or camera capture.
const IMAGE_FIELD: &str = "image";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TextLookupRequest {
    Name { text: String },
    Url { text: String },
}

impl From<TextLookupRequest> for ProductQuery {
    fn from(request: TextLookupRequest) -> Self {
        match request {
            TextLookupRequest::Name { text } => ProductQuery::Name(text),
            TextLookupRequest::Url { text } => ProductQuery::Url(text),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/products/lookup
///
/// Looks up a product by typed name or product-page URL.
pub async fn handle_lookup(
    State(state): State<AppState>,
    Json(request): Json<TextLookupRequest>,
) -> Result<Json<ProductInfo>, AppError> {
    let query = ProductQuery::from(request);
    let product = lookup_product(state.llm.as_ref(), &query).await?;
    Ok(Json(product))
}

/// POST /api/v1/products/lookup/image
///
/// Looks up a product from an uploaded photo (multipart field `image`).
/// The part's content type is forwarded to the model as the media type.
pub async fn handle_lookup_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProductInfo>, AppError> {
    let query = read_image_field(&mut multipart).await?;
    let product = lookup_product(state.llm.as_ref(), &query).await?;
    Ok(Json(product))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<ProductQuery, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| LookupError::Encoding(EncodingError::Read(e.to_string())))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let media_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or("camera-capture").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| LookupError::Encoding(EncodingError::Read(e.to_string())))?;

        info!(
            "Received image {file_name:?} ({media_type}, {} bytes)",
            bytes.len()
        );

        return Ok(ProductQuery::Image { bytes, media_type });
    }

    Err(AppError::Validation(format!(
        "multipart field '{IMAGE_FIELD}' is required"
    )))
}
