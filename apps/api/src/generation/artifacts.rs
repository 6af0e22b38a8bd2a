//! Typed targets for every generated artifact.
//!
//! Each type implements `ExtractTarget`, so the same fallback chain recovers
//! it from whatever shape the model answered in. Optional-looking fields carry
//! `#[serde(default)]` so a terse but well-formed answer still parses.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extraction::ExtractTarget;
use crate::tech::stack::TechStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    BusinessGoals,
    Requirements,
    Features,
    DataModel,
    ApiEndpoints,
    DesignSystem,
    TechStack,
    TestCases,
    Readme,
    Rules,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 10] = [
        ArtifactKind::BusinessGoals,
        ArtifactKind::Requirements,
        ArtifactKind::Features,
        ArtifactKind::DataModel,
        ArtifactKind::ApiEndpoints,
        ArtifactKind::DesignSystem,
        ArtifactKind::TechStack,
        ArtifactKind::TestCases,
        ArtifactKind::Readme,
        ArtifactKind::Rules,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::BusinessGoals => "business_goals",
            ArtifactKind::Requirements => "requirements",
            ArtifactKind::Features => "features",
            ArtifactKind::DataModel => "data_model",
            ArtifactKind::ApiEndpoints => "api_endpoints",
            ArtifactKind::DesignSystem => "design_system",
            ArtifactKind::TechStack => "tech_stack",
            ArtifactKind::TestCases => "test_cases",
            ArtifactKind::Readme => "readme",
            ArtifactKind::Rules => "rules",
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown artifact '{s}'")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

// Models capitalize freely ("High", "LOW"), so matching ignores case.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(de::Error::unknown_variant(&raw, &["high", "medium", "low"])),
        }
    }
}

// ── Business goals ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessGoal {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessGoals {
    pub goals: Vec<BusinessGoal>,
}

impl ExtractTarget for BusinessGoals {
    const SCHEMA_NAME: &'static str = "business_goals";
}

// ── Requirements ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementsList {
    pub functional: Vec<Requirement>,
    #[serde(default)]
    pub non_functional: Vec<Requirement>,
}

impl ExtractTarget for RequirementsList {
    const SCHEMA_NAME: &'static str = "requirements";
}

// ── Features ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub user_stories: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureList {
    pub features: Vec<Feature>,
}

impl ExtractTarget for FeatureList {
    const SCHEMA_NAME: &'static str = "features";
}

// ── Data model ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub fields: Vec<EntityField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    /// one_to_one | one_to_many | many_to_many
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataModel {
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl ExtractTarget for DataModel {
    const SCHEMA_NAME: &'static str = "data_model";
}

fn default_true() -> bool {
    true
}

// ── API endpoints ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    pub description: String,
    #[serde(default)]
    pub request_body: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub auth_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpointList {
    pub endpoints: Vec<ApiEndpoint>,
}

impl ExtractTarget for ApiEndpointList {
    const SCHEMA_NAME: &'static str = "api_endpoints";
}

// ── Design system ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    pub font_family: String,
    #[serde(default)]
    pub heading_font: Option<String>,
    #[serde(default)]
    pub base_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSystem {
    /// Token name → CSS color, e.g. "primary" → "#2563eb".
    pub colors: BTreeMap<String, String>,
    pub typography: Typography,
    #[serde(default)]
    pub spacing: BTreeMap<String, String>,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl ExtractTarget for DesignSystem {
    const SCHEMA_NAME: &'static str = "design_system";
}

// ── Tech stack ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechStackRecommendation {
    pub tech_stack: TechStack,
    #[serde(default)]
    pub rationale: String,
}

impl ExtractTarget for TechStackRecommendation {
    const SCHEMA_NAME: &'static str = "tech_stack";
}

// ── Test cases ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    pub expected_result: String,
    /// unit | integration | e2e
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCases {
    pub test_cases: Vec<TestCase>,
}

impl ExtractTarget for TestCases {
    const SCHEMA_NAME: &'static str = "test_cases";

    /// An empty answer means the model found nothing worth testing.
    fn empty_fallback() -> Option<Self> {
        Some(TestCases { test_cases: vec![] })
    }
}

// ── Documents ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeDocument {
    pub title: String,
    /// Markdown body.
    pub content: String,
}

impl ExtractTarget for ReadmeDocument {
    const SCHEMA_NAME: &'static str = "readme";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesDocument {
    pub rules: Vec<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ExtractTarget for RulesDocument {
    const SCHEMA_NAME: &'static str = "rules";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract_data_from_response;
    use serde_json::json;

    #[test]
    fn test_artifact_kind_serde_matches_as_str() {
        for kind in ArtifactKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, json!(kind.as_str()));
        }
    }

    #[test]
    fn test_artifact_kind_parses_from_path_segment() {
        assert_eq!("data_model".parse::<ArtifactKind>().unwrap(), ArtifactKind::DataModel);
        assert!(matches!(
            "bogus".parse::<ArtifactKind>(),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_test_cases_empty_response_yields_empty_list() {
        let cases: TestCases = extract_data_from_response(&json!({})).unwrap();
        assert!(cases.test_cases.is_empty());
    }

    #[test]
    fn test_requirements_empty_response_is_an_error() {
        assert!(extract_data_from_response::<RequirementsList>(&json!({})).is_err());
    }

    #[test]
    fn test_data_model_field_defaults() {
        let model: DataModel = extract_data_from_response(&json!({
            "data": {
                "entities": [{
                    "name": "User",
                    "fields": [{"name": "email", "type": "string"}]
                }]
            }
        }))
        .unwrap();
        assert!(model.entities[0].fields[0].required);
        assert!(model.relationships.is_empty());
    }

    #[test]
    fn test_tech_stack_recommendation_rejects_malformed_stack() {
        let response = json!({"data": {"tech_stack": {"frontend": "React"}}});
        assert!(extract_data_from_response::<TechStackRecommendation>(&response).is_err());
    }

    #[test]
    fn test_priority_ignores_case() {
        let goals: BusinessGoals = extract_data_from_response(&json!({
            "data": {"goals": [
                {"title": "Grow", "description": "Reach 10k users", "priority": "High"},
                {"title": "Trim", "description": "Cut hosting cost", "priority": " LOW "}
            ]}
        }))
        .unwrap();
        assert_eq!(goals.goals[0].priority, Priority::High);
        assert_eq!(goals.goals[1].priority, Priority::Low);
        assert!(serde_json::from_value::<Priority>(json!("urgent")).is_err());
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        let goals: BusinessGoals = extract_data_from_response(&json!({
            "goals": [{"title": "Grow", "description": "Reach 10k users"}]
        }))
        .unwrap();
        assert_eq!(goals.goals[0].priority, Priority::Medium);
    }
}
