use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistrySnapshotRow {
    pub id: Uuid,
    pub version: String,
    pub snapshot: Value,
    pub created_at: DateTime<Utc>,
}
