use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecSectionRow {
    pub project_id: Uuid,
    pub section: String,
    pub data: Value,
    pub updated_at: DateTime<Utc>,
}
