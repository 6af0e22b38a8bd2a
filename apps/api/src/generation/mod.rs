// Artifact generation: one forced tool call per artifact, typed extraction of
// the answer, registry validation for tech stack recommendations.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod artifacts;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod tools;
