use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::llm_client::{lenient, Citation};

/// Registration number placeholder when the search could not find one.
pub const REGISTRATION_NOT_FOUND: &str = "Not Found";
/// Registration number placeholder for products that do not need BPOM registration.
pub const REGISTRATION_NOT_APPLICABLE: &str = "Not Applicable";

/// What the user gave us to identify a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    Name(String),
    Url(String),
    /// Uploaded file or camera capture.
    Image { bytes: Bytes, media_type: String },
}

impl ProductQuery {
    pub fn kind(&self) -> &'static str {
        match self {
            ProductQuery::Name(_) => "name",
            ProductQuery::Url(_) => "url",
            ProductQuery::Image { .. } => "image",
        }
    }
}

/// Resolved product metadata.
///
/// Wire keys follow the JSON contract given to the model (`fungsi`, `nomorBPOM`).
/// `sources` comes from the gateway's grounding metadata, never from the model's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    #[serde(rename = "fungsi")]
    pub function: String,
    #[serde(rename = "nomorBPOM", default = "default_registration_number")]
    pub registration_number: String,
    #[serde(default)]
    pub sources: Vec<Citation>,
}

fn default_registration_number() -> String {
    REGISTRATION_NOT_FOUND.to_string()
}

/// The product object as the model returned it, before validation.
/// Field types are not trusted: anything that is not text reads as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ProductCandidate {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub name: Option<String>,
    #[serde(rename = "fungsi", default, deserialize_with = "lenient::optional_text")]
    pub function: Option<String>,
    #[serde(rename = "nomorBPOM", default, deserialize_with = "lenient::optional_text")]
    pub registration_number: Option<String>,
}

impl ProductCandidate {
    /// Applies the lookup completeness rule: `name` and `fungsi` must be present and non-blank.
    /// Returns the names of the failing fields otherwise.
    pub fn validate(self) -> Result<ProductInfo, Vec<String>> {
        let name = non_blank(self.name);
        let function = non_blank(self.function);

        match (name, function) {
            (Some(name), Some(function)) => Ok(ProductInfo {
                name,
                function,
                registration_number: non_blank(self.registration_number)
                    .unwrap_or_else(default_registration_number),
                sources: Vec::new(),
            }),
            (name, function) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name".to_string());
                }
                if function.is_none() {
                    missing.push("fungsi".to_string());
                }
                Err(missing)
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
