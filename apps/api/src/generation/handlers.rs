//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::generation::artifacts::ArtifactKind;
use crate::generation::generator::{generate_artifact, GenerateRequest, GeneratedArtifact};
use crate::state::AppState;

/// POST /api/v1/generate/:artifact
///
/// Generates one specification artifact for the described project.
/// `tech_stack` responses also carry a validation result.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppPath(artifact): AppPath<String>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GeneratedArtifact>, AppError> {
    let artifact: ArtifactKind = artifact.parse()?;
    let generated = generate_artifact(state.llm.as_ref(), &state.tech, artifact, &request).await?;
    Ok(Json(generated))
}

/// GET /api/v1/generate
///
/// Lists the artifact kinds accepted by `POST /api/v1/generate/:artifact`.
pub async fn handle_list_artifacts() -> Json<Value> {
    let artifacts: Vec<&str> = ArtifactKind::ALL.iter().map(ArtifactKind::as_str).collect();
    Json(json!({ "artifacts": artifacts }))
}
