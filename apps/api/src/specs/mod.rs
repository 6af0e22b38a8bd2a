// Project specification sections (timeline, budget, requirements, metadata),
// stored as JSONB documents keyed by (project_id, section).

pub mod handlers;
pub mod models;
pub mod store;
