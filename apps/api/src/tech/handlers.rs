//! Axum route handlers for the Tech API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::state::AppState;
use crate::tech::registry::{RegistrySnapshot, TechCategory};
use crate::tech::stack::TechStack;
use crate::tech::suggestions::Suggestions;
use crate::tech::validator::{CorrectionResult, ValidationResult};

// Stacks arrive as raw JSON so shape errors carry the path of the offending
// value.

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub tech_stack: Value,
    pub template_tech_stack: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TechStackRequest {
    pub tech_stack: Value,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Suggestions,
}

/// GET /api/v1/tech/registry
pub async fn handle_get_registry(State(state): State<AppState>) -> Json<RegistrySnapshot> {
    Json(state.tech.registry().to_snapshot())
}

/// GET /api/v1/tech/registry/:category
pub async fn handle_get_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> Result<Json<TechCategory>, AppError> {
    state
        .tech
        .registry()
        .category(&category)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Technology category '{category}' not found")))
}

/// POST /api/v1/tech/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    AppJson(request): AppJson<ValidateRequest>,
) -> Result<Json<ValidationResult>, AppError> {
    let tech_stack = TechStack::from_value(&request.tech_stack)?;
    let template = request
        .template_tech_stack
        .as_ref()
        .filter(|t| !t.is_null())
        .map(TechStack::from_value)
        .transpose()?;

    Ok(Json(state.tech.validate(&tech_stack, template.as_ref())))
}

/// POST /api/v1/tech/suggest
pub async fn handle_suggest(
    State(state): State<AppState>,
    AppJson(request): AppJson<TechStackRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let tech_stack = TechStack::from_value(&request.tech_stack)?;
    Ok(Json(SuggestResponse {
        suggestions: state.tech.suggest(&tech_stack),
    }))
}

/// POST /api/v1/tech/correct
pub async fn handle_correct(
    State(state): State<AppState>,
    AppJson(request): AppJson<TechStackRequest>,
) -> Result<Json<CorrectionResult>, AppError> {
    let tech_stack = TechStack::from_value(&request.tech_stack)?;
    Ok(Json(state.tech.auto_correct(&tech_stack)))
}
