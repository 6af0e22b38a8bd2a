//! Tool definitions handed to the model, one per artifact.
//!
//! Each `input_schema` mirrors the matching type in `artifacts.rs`.

use serde_json::{json, Value};

use crate::generation::artifacts::ArtifactKind;
use crate::llm_client::ToolDefinition;

pub fn tool_for(kind: ArtifactKind) -> ToolDefinition {
    let (description, input_schema) = match kind {
        ArtifactKind::BusinessGoals => ("Submit the project's business goals.", business_goals_schema()),
        ArtifactKind::Requirements => (
            "Submit functional and non-functional requirements.",
            requirements_schema(),
        ),
        ArtifactKind::Features => ("Submit the product feature list.", features_schema()),
        ArtifactKind::DataModel => ("Submit the data model: entities and relationships.", data_model_schema()),
        ArtifactKind::ApiEndpoints => ("Submit the HTTP API endpoint design.", api_endpoints_schema()),
        ArtifactKind::DesignSystem => ("Submit the UI design system.", design_system_schema()),
        ArtifactKind::TechStack => ("Submit the recommended tech stack.", tech_stack_schema()),
        ArtifactKind::TestCases => ("Submit test cases for the project.", test_cases_schema()),
        ArtifactKind::Readme => ("Submit the project README.", readme_schema()),
        ArtifactKind::Rules => ("Submit the project's coding and contribution rules.", rules_schema()),
    };

    ToolDefinition {
        name: format!("submit_{}", kind.as_str()),
        description: description.to_string(),
        input_schema,
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

fn string() -> Value {
    json!({ "type": "string" })
}

fn string_list() -> Value {
    array_of(string())
}

fn priority() -> Value {
    json!({ "type": "string", "enum": ["high", "medium", "low"] })
}

fn business_goals_schema() -> Value {
    object(
        json!({
            "goals": array_of(object(
                json!({
                    "title": string(),
                    "description": string(),
                    "priority": priority(),
                    "success_metrics": string_list(),
                }),
                &["title", "description"],
            )),
        }),
        &["goals"],
    )
}

fn requirement() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "description": string(),
            "priority": priority(),
        }),
        &["id", "title", "description"],
    )
}

fn requirements_schema() -> Value {
    object(
        json!({
            "functional": array_of(requirement()),
            "non_functional": array_of(requirement()),
        }),
        &["functional", "non_functional"],
    )
}

fn features_schema() -> Value {
    object(
        json!({
            "features": array_of(object(
                json!({
                    "name": string(),
                    "description": string(),
                    "priority": priority(),
                    "user_stories": string_list(),
                    "acceptance_criteria": string_list(),
                }),
                &["name", "description"],
            )),
        }),
        &["features"],
    )
}

fn data_model_schema() -> Value {
    let field = object(
        json!({
            "name": string(),
            "type": string(),
            "required": { "type": "boolean" },
            "description": string(),
        }),
        &["name", "type"],
    );
    let relationship = object(
        json!({
            "from": string(),
            "to": string(),
            "type": { "type": "string", "enum": ["one_to_one", "one_to_many", "many_to_many"] },
            "description": string(),
        }),
        &["from", "to", "type"],
    );
    object(
        json!({
            "entities": array_of(object(
                json!({
                    "name": string(),
                    "description": string(),
                    "fields": array_of(field),
                }),
                &["name", "fields"],
            )),
            "relationships": array_of(relationship),
        }),
        &["entities"],
    )
}

fn api_endpoints_schema() -> Value {
    object(
        json!({
            "endpoints": array_of(object(
                json!({
                    "method": { "type": "string", "enum": ["GET", "POST", "PUT", "PATCH", "DELETE"] },
                    "path": string(),
                    "description": string(),
                    "request_body": { "type": "object" },
                    "response": { "type": "object" },
                    "auth_required": { "type": "boolean" },
                }),
                &["method", "path", "description"],
            )),
        }),
        &["endpoints"],
    )
}

fn design_system_schema() -> Value {
    let string_map = json!({ "type": "object", "additionalProperties": { "type": "string" } });
    object(
        json!({
            "colors": string_map,
            "typography": object(
                json!({
                    "font_family": string(),
                    "heading_font": string(),
                    "base_size": string(),
                }),
                &["font_family"],
            ),
            "spacing": string_map,
            "components": array_of(object(
                json!({
                    "name": string(),
                    "description": string(),
                    "variants": string_list(),
                }),
                &["name", "description"],
            )),
        }),
        &["colors", "typography"],
    )
}

fn tech_stack_schema() -> Value {
    // Field values are a name or a list of names.
    let field = json!({ "anyOf": [string(), string_list()] });
    let section = json!({ "type": "object", "additionalProperties": field });
    object(
        json!({
            "tech_stack": object(
                json!({
                    "frontend": section,
                    "backend": section,
                    "database": section,
                    "authentication": section,
                    "deployment": section,
                    "testing": section,
                }),
                &["frontend", "backend", "database"],
            ),
            "rationale": string(),
        }),
        &["tech_stack", "rationale"],
    )
}

fn test_cases_schema() -> Value {
    object(
        json!({
            "test_cases": array_of(object(
                json!({
                    "title": string(),
                    "description": string(),
                    "steps": string_list(),
                    "expected_result": string(),
                    "type": { "type": "string", "enum": ["unit", "integration", "e2e"] },
                }),
                &["title", "description", "expected_result"],
            )),
        }),
        &["test_cases"],
    )
}

fn readme_schema() -> Value {
    object(
        json!({ "title": string(), "content": string() }),
        &["title", "content"],
    )
}

fn rules_schema() -> Value {
    object(
        json!({ "rules": string_list(), "content": string() }),
        &["rules"],
    )
}
