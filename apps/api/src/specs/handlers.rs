use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::models::spec::SpecSectionRow;
use crate::specs::models::{validate_section, SpecSection};
use crate::specs::store::{delete_section, get_section, get_sections, upsert_section};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProjectSpecResponse {
    pub project_id: Uuid,
    pub sections: BTreeMap<String, Value>,
}

/// GET /api/v1/projects/:id/spec
pub async fn handle_get_spec(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<ProjectSpecResponse>, AppError> {
    let rows = get_sections(&state.db, project_id).await?;
    Ok(Json(ProjectSpecResponse {
        project_id,
        sections: rows.into_iter().map(|r| (r.section, r.data)).collect(),
    }))
}

/// GET /api/v1/projects/:id/spec/:section
pub async fn handle_get_section(
    State(state): State<AppState>,
    AppPath((project_id, section)): AppPath<(Uuid, String)>,
) -> Result<Json<SpecSectionRow>, AppError> {
    let section: SpecSection = section.parse()?;
    get_section(&state.db, project_id, section)
        .await?
        .map(Json)
        .ok_or_else(|| section_not_found(project_id, section))
}

/// PUT /api/v1/projects/:id/spec/:section
pub async fn handle_put_section(
    State(state): State<AppState>,
    AppPath((project_id, section)): AppPath<(Uuid, String)>,
    AppJson(data): AppJson<Value>,
) -> Result<Json<SpecSectionRow>, AppError> {
    let section: SpecSection = section.parse()?;
    let data = validate_section(section, data)?;
    let row = upsert_section(&state.db, project_id, section, &data).await?;
    info!("Stored {} section for project {}", section.as_str(), project_id);
    Ok(Json(row))
}

/// DELETE /api/v1/projects/:id/spec/:section
pub async fn handle_delete_section(
    State(state): State<AppState>,
    AppPath((project_id, section)): AppPath<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let section: SpecSection = section.parse()?;
    if delete_section(&state.db, project_id, section).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(section_not_found(project_id, section))
    }
}

fn section_not_found(project_id: Uuid, section: SpecSection) -> AppError {
    AppError::NotFound(format!(
        "Section '{}' not found for project {project_id}",
        section.as_str()
    ))
}
