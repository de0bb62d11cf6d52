pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::content::handlers as content;
use crate::product::handlers as product;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Product lookup
        .route("/api/v1/products/lookup", post(product::handle_lookup))
        .route(
            "/api/v1/products/lookup/image",
            post(product::handle_lookup_image),
        )
        // Content generation
        .route("/api/v1/content/generate", post(content::handle_generate))
        .route("/api/v1/content/export", post(content::handle_export))
        .route("/api/v1/options", get(content::handle_options))
        .with_state(state)
}
