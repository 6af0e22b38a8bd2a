//! Artifact Generation: builds the prompt, forces the artifact's tool, and
//! recovers the typed artifact from the response.
//!
//! Flow: request → prompt + tool → ToolCaller → extract_data_from_response →
//!       (tech stack only) validate against registry and template → response.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_data_from_response, ExtractTarget};
use crate::generation::artifacts::{
    ApiEndpointList, ArtifactKind, BusinessGoals, DataModel, DesignSystem, FeatureList,
    ReadmeDocument, RequirementsList, RulesDocument, TechStackRecommendation, TestCases,
};
use crate::generation::prompts::{instructions_for, GENERATION_PROMPT_TEMPLATE};
use crate::generation::tools::tool_for;
use crate::llm_client::prompts::{REGISTRY_NAMING_INSTRUCTION, TOOL_ONLY_SYSTEM};
use crate::llm_client::ToolCaller;
use crate::tech::stack::TechStack;
use crate::tech::validator::{TechValidator, ValidationResult};

const UNNAMED_PROJECT: &str = "Untitled project";

/// Request body for artifact generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub project_description: String,
    #[serde(default)]
    pub project_name: Option<String>,
    /// Previously generated artifacts or notes, passed to the model verbatim.
    #[serde(default)]
    pub context: Option<Value>,
    /// Only consulted for `tech_stack`: constrains the prompt and the validation.
    #[serde(default)]
    pub template_tech_stack: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArtifact {
    pub artifact: ArtifactKind,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
}

pub async fn generate_artifact(
    llm: &dyn ToolCaller,
    validator: &TechValidator,
    kind: ArtifactKind,
    request: &GenerateRequest,
) -> Result<GeneratedArtifact, AppError> {
    if request.project_description.trim().is_empty() {
        return Err(AppError::Validation(
            "project_description cannot be empty".to_string(),
        ));
    }

    let template = request
        .template_tech_stack
        .as_ref()
        .filter(|t| !t.is_null())
        .map(TechStack::from_value)
        .transpose()?;

    let prompt = build_prompt(kind, request, template.as_ref())?;
    let tool = tool_for(kind);

    info!("Generating {} via tool '{}'", kind.as_str(), tool.name);
    let response = llm
        .call_tool(&prompt, TOOL_ONLY_SYSTEM, &tool)
        .await
        .map_err(|e| AppError::Llm(format!("{} generation failed: {e}", kind.as_str())))?;

    let (data, validation) = match kind {
        ArtifactKind::BusinessGoals => (extract_json::<BusinessGoals>(&response)?, None),
        ArtifactKind::Requirements => (extract_json::<RequirementsList>(&response)?, None),
        ArtifactKind::Features => (extract_json::<FeatureList>(&response)?, None),
        ArtifactKind::DataModel => (extract_json::<DataModel>(&response)?, None),
        ArtifactKind::ApiEndpoints => (extract_json::<ApiEndpointList>(&response)?, None),
        ArtifactKind::DesignSystem => (extract_json::<DesignSystem>(&response)?, None),
        ArtifactKind::TestCases => (extract_json::<TestCases>(&response)?, None),
        ArtifactKind::Readme => (extract_json::<ReadmeDocument>(&response)?, None),
        ArtifactKind::Rules => (extract_json::<RulesDocument>(&response)?, None),
        ArtifactKind::TechStack => {
            let recommendation: TechStackRecommendation = extract_data_from_response(&response)?;
            let validation = validator.validate(&recommendation.tech_stack, template.as_ref());
            if !validation.is_valid {
                warn!(
                    "Recommended tech stack names {} unknown technologies",
                    validation.invalid_technologies.len()
                );
            }
            (to_json(&recommendation)?, Some(validation))
        }
    };

    Ok(GeneratedArtifact {
        artifact: kind,
        data,
        validation,
    })
}

fn extract_json<T: ExtractTarget + Serialize>(response: &Value) -> Result<Value, AppError> {
    let artifact: T = extract_data_from_response(response)?;
    to_json(&artifact)
}

fn to_json<T: Serialize>(artifact: &T) -> Result<Value, AppError> {
    serde_json::to_value(artifact)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize artifact: {e}")))
}

/// Fills the generation template for `kind`.
fn build_prompt(
    kind: ArtifactKind,
    request: &GenerateRequest,
    template: Option<&TechStack>,
) -> Result<String, AppError> {
    let mut context = String::new();

    if let Some(extra) = request.context.as_ref().filter(|c| !c.is_null()) {
        let extra = serde_json::to_string_pretty(extra)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize context: {e}")))?;
        context.push_str("CONTEXT (already agreed, stay consistent with it):\n");
        context.push_str(&extra);
        context.push_str("\n\n");
    }

    if kind == ArtifactKind::TechStack {
        context.push_str(REGISTRY_NAMING_INSTRUCTION);
        context.push_str("\n\n");
        if let Some(template) = template {
            let template = serde_json::to_string_pretty(template).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize template: {e}"))
            })?;
            context.push_str(
                "TEMPLATE TECH STACK (pick the template value or one of its options for every field):\n",
            );
            context.push_str(&template);
            context.push_str("\n\n");
        }
    }

    let project_name = request
        .project_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED_PROJECT);

    Ok(GENERATION_PROMPT_TEMPLATE
        .replace("{project_name}", project_name)
        .replace("{project_description}", request.project_description.trim())
        .replace("{instructions}", instructions_for(kind))
        .replace("{context}", &context))
}
