use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::registry::RegistrySnapshotRow;
use crate::tech::registry::{RegistrySnapshot, TechRegistry};

/// Loads the newest persisted registry snapshot. When none exists, the
/// built-in registry is written and returned.
pub async fn load_or_seed_registry(pool: &PgPool) -> Result<TechRegistry> {
    let latest: Option<RegistrySnapshotRow> = sqlx::query_as(
        "SELECT * FROM tech_registry_snapshots ORDER BY created_at DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    if let Some(row) = latest {
        let snapshot: RegistrySnapshot = serde_json::from_value(row.snapshot)
            .with_context(|| format!("Registry snapshot {} is malformed", row.id))?;
        let registry = TechRegistry::from_snapshot(snapshot);
        info!(
            "Loaded technology registry v{} ({} technologies)",
            registry.version(),
            registry.all_technologies().len()
        );
        return Ok(registry);
    }

    let registry = TechRegistry::builtin();
    save_snapshot(pool, &registry).await?;
    info!(
        "Seeded built-in technology registry v{} ({} technologies)",
        registry.version(),
        registry.all_technologies().len()
    );
    Ok(registry)
}

/// Appends a snapshot row. Older rows are kept as history.
pub async fn save_snapshot(pool: &PgPool, registry: &TechRegistry) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let snapshot = serde_json::to_value(registry.to_snapshot())?;

    sqlx::query(
        "INSERT INTO tech_registry_snapshots (id, version, snapshot) VALUES ($1, $2, $3)",
    )
    .bind(id)
    .bind(registry.version())
    .bind(snapshot)
    .execute(pool)
    .await?;

    Ok(id)
}
