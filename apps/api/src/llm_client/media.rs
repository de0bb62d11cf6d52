use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::llm_client::BinaryPart;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Failed to read image: {0}")]
    Read(String),

    #[error("Image is empty")]
    Empty,

    #[error("Unsupported media type '{0}': expected an image/* type")]
    UnsupportedMediaType(String),
}

/// Base64-encodes image bytes into an inline part. The media type is carried through untouched.
pub fn encode_image(bytes: &[u8], media_type: &str) -> Result<BinaryPart, EncodingError> {
    if bytes.is_empty() {
        return Err(EncodingError::Empty);
    }

    let is_image = media_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"));
    if !is_image || media_type.len() == 6 {
        return Err(EncodingError::UnsupportedMediaType(media_type.to_string()));
    }

    Ok(BinaryPart {
        data: STANDARD.encode(bytes),
        media_type: media_type.to_string(),
    })
}
