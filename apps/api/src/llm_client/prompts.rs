// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that pins output to the supplied tool.
pub const TOOL_ONLY_SYSTEM: &str = "You are a senior software architect and technical writer. \
    You MUST answer by calling the provided tool exactly once. \
    Every required field of the tool input must be filled. \
    Do NOT answer in prose. \
    Do NOT invent fields that are not in the tool schema.";

/// Appended to prompts whose output names concrete technologies.
pub const REGISTRY_NAMING_INSTRUCTION: &str = "\
    Use canonical technology names exactly as commonly published \
    (e.g. 'React', 'Vue.js', 'Express.js', 'PostgreSQL', 'Tailwind CSS'). \
    Do NOT abbreviate or add version numbers.";
