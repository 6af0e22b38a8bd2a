// Prompt text for artifact generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::generation::artifacts::ArtifactKind;

/// Generation prompt template. Replace `{project_name}`, `{project_description}`,
/// `{instructions}` and `{context}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"You are preparing a software specification.

PROJECT: {project_name}

DESCRIPTION:
{project_description}

TASK:
{instructions}

{context}
Call the provided tool with your answer."#;

pub fn instructions_for(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::BusinessGoals => {
            "List 3-6 business goals this project serves. Each goal needs a short title, \
            a one-paragraph description, a priority (high, medium or low) and measurable \
            success metrics."
        }
        ArtifactKind::Requirements => {
            "Write the functional and non-functional requirements. Give each requirement a \
            stable id (FR-1, FR-2, ... and NFR-1, NFR-2, ...), a title, a testable \
            description and a priority."
        }
        ArtifactKind::Features => {
            "Break the product into features. For each feature give a name, a description, \
            a priority, user stories in 'As a <role>, I want <goal> so that <benefit>' form, \
            and acceptance criteria."
        }
        ArtifactKind::DataModel => {
            "Design the persistent data model. List every entity with its fields and field \
            types, mark optional fields with required=false, and list the relationships \
            between entities (one_to_one, one_to_many, many_to_many)."
        }
        ArtifactKind::ApiEndpoints => {
            "Design the HTTP API. For each endpoint give the method, a RESTful path, a \
            description, example request and response bodies where relevant, and whether \
            authentication is required."
        }
        ArtifactKind::DesignSystem => {
            "Define a UI design system: named color tokens as hex values, typography, a \
            spacing scale, and the core components with their variants."
        }
        ArtifactKind::TechStack => {
            "Recommend a tech stack with sections frontend, backend, database, \
            authentication, deployment and testing. Each section maps a field (framework, \
            language, orm, provider, platform, ...) to one technology name or a list of \
            names. Explain the choice in the rationale."
        }
        ArtifactKind::TestCases => {
            "Write test cases covering the most important behaviour. Each test case needs a \
            title, a description, ordered steps, the expected result and its type (unit, \
            integration or e2e). Return an empty list if nothing is testable yet."
        }
        ArtifactKind::Readme => {
            "Write the project README in Markdown: overview, features, tech stack, getting \
            started, configuration and contribution notes."
        }
        ArtifactKind::Rules => {
            "Write the coding and contribution rules for this project as a list of short, \
            imperative rules, plus an optional Markdown document expanding on them."
        }
    }
}
