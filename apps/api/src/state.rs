use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::ToolCaller;
use crate::tech::validator::TechValidator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Tool-calling LLM backend. Production: `LlmClient`.
    pub llm: Arc<dyn ToolCaller>,
    /// Validator over the registry loaded at startup. Read-only for the process lifetime.
    pub tech: Arc<TechValidator>,
}
