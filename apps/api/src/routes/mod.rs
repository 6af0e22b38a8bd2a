pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::specs::handlers as specs;
use crate::state::AppState;
use crate::tech::handlers as tech;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tech registry, validation and suggestions
        .route("/api/v1/tech/registry", get(tech::handle_get_registry))
        .route(
            "/api/v1/tech/registry/:category",
            get(tech::handle_get_category),
        )
        .route("/api/v1/tech/validate", post(tech::handle_validate))
        .route("/api/v1/tech/suggest", post(tech::handle_suggest))
        .route("/api/v1/tech/correct", post(tech::handle_correct))
        // Artifact generation
        .route("/api/v1/generate", get(generation::handle_list_artifacts))
        .route(
            "/api/v1/generate/:artifact",
            post(generation::handle_generate),
        )
        // Project specification sections
        .route("/api/v1/projects/:id/spec", get(specs::handle_get_spec))
        .route(
            "/api/v1/projects/:id/spec/:section",
            get(specs::handle_get_section)
                .put(specs::handle_put_section)
                .delete(specs::handle_delete_section),
        )
        .with_state(state)
}
