use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::content::generator::GenerationError;
use crate::product::lookup::LookupError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad user input: empty query, unreadable upload, missing precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model service failed (network, auth, quota). Message is shown verbatim.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The model answered, but not with something usable.
    #[error("Model output error: {message}")]
    ModelOutput {
        message: String,
        partial: Option<Value>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Input(_) | LookupError::Encoding(_) => {
                AppError::Validation(err.to_string())
            }
            LookupError::Upstream(e) => AppError::Upstream(e.to_string()),
            LookupError::Extraction | LookupError::Validation(_) => AppError::ModelOutput {
                message: err.to_string(),
                partial: None,
            },
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Precondition(msg) => AppError::Validation(msg),
            GenerationError::Upstream(e) => AppError::Upstream(e.to_string()),
            GenerationError::Extraction => AppError::ModelOutput {
                message: err.to_string(),
                partial: None,
            },
            GenerationError::Validation { ref partial, .. } => {
                let partial = serde_json::to_value(&**partial).ok();
                AppError::ModelOutput {
                    message: err.to_string(),
                    partial,
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, partial) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg, None)
            }
            AppError::ModelOutput { message, partial } => {
                tracing::warn!("Model output error: {message}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "MODEL_OUTPUT_ERROR",
                    message,
                    partial,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(partial) = partial {
            body["partial"] = partial;
        }

        (status, Json(body)).into_response()
    }
}
