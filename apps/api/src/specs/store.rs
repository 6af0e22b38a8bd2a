use sqlx::PgPool;
use uuid::Uuid;

use crate::models::spec::SpecSectionRow;
use crate::specs::models::SpecSection;

pub async fn get_sections(pool: &PgPool, project_id: Uuid) -> Result<Vec<SpecSectionRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM project_spec_sections WHERE project_id = $1 ORDER BY section",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn get_section(
    pool: &PgPool,
    project_id: Uuid,
    section: SpecSection,
) -> Result<Option<SpecSectionRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM project_spec_sections WHERE project_id = $1 AND section = $2",
    )
    .bind(project_id)
    .bind(section.as_str())
    .fetch_optional(pool)
    .await
}

/// Inserts the section or replaces its body, bumping `updated_at`.
pub async fn upsert_section(
    pool: &PgPool,
    project_id: Uuid,
    section: SpecSection,
    data: &serde_json::Value,
) -> Result<SpecSectionRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO project_spec_sections (project_id, section, data, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (project_id, section)
        DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(project_id)
    .bind(section.as_str())
    .bind(data)
    .fetch_one(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete_section(
    pool: &PgPool,
    project_id: Uuid,
    section: SpecSection,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM project_spec_sections WHERE project_id = $1 AND section = $2",
    )
    .bind(project_id)
    .bind(section.as_str())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
