//! Tech stack validation against the registry and, optionally, a template.
//!
//! Two independent passes:
//! 1. registry membership for every leaf name (drives `is_valid`)
//! 2. template compatibility per declared section (drives `is_compatible`)
//!
//! A stack made only of known technologies can still be incompatible with a
//! template, and vice versa.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tech::registry::TechRegistry;
use crate::tech::stack::{FieldValue, StackSection, TechStack, DECLARED_SECTIONS, OPTIONS_KEY};
use crate::tech::suggestions::{suggest, Suggestions};

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidTechnology {
    pub section: String,
    pub key: String,
    pub technology: String,
    /// Closest registry name, when one is close enough to be a likely typo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incompatibility {
    pub section: String,
    pub key: String,
    pub selected: String,
    pub allowed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateCompatibility {
    pub is_compatible: bool,
    pub incompatibilities: Vec<Incompatibility>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub invalid_technologies: Vec<InvalidTechnology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_compatibility: Option<TemplateCompatibility>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub section: String,
    pub key: String,
    pub original: String,
    pub corrected: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrectionResult {
    pub tech_stack: TechStack,
    pub corrections: Vec<Correction>,
}

/// Read-only validator over a shared registry.
#[derive(Debug, Clone)]
pub struct TechValidator {
    registry: Arc<TechRegistry>,
    match_threshold: f64,
}

impl TechValidator {
    pub fn new(registry: Arc<TechRegistry>, match_threshold: f64) -> Self {
        Self {
            registry,
            match_threshold,
        }
    }

    pub fn registry(&self) -> &TechRegistry {
        &self.registry
    }

    pub fn validate(&self, tech_stack: &TechStack, template: Option<&TechStack>) -> ValidationResult {
        let mut invalid_technologies = Vec::new();

        for (section, fields) in tech_stack.ordered_sections() {
            for (key, value) in fields {
                for (path, name) in value.leaves(key) {
                    if self.registry.is_valid_tech(name) {
                        continue;
                    }
                    let suggestion = self
                        .registry
                        .closest_match(name, self.match_threshold)
                        .map(String::from);
                    invalid_technologies.push(InvalidTechnology {
                        section: section.to_string(),
                        key: path,
                        technology: name.to_string(),
                        suggestion,
                    });
                }
            }
        }

        let template_compatibility = template.map(|t| check_template(tech_stack, t));

        debug!(
            "Validated tech stack: {} invalid, template compatible: {:?}",
            invalid_technologies.len(),
            template_compatibility.as_ref().map(|c| c.is_compatible)
        );

        ValidationResult {
            is_valid: invalid_technologies.is_empty(),
            invalid_technologies,
            template_compatibility,
        }
    }

    /// Replaces unknown names with their closest registry match. Names with no
    /// close match are left as they are. Corrections come out in the same
    /// order and under the same keys as `validate` reports.
    pub fn auto_correct(&self, tech_stack: &TechStack) -> CorrectionResult {
        let mut corrected = tech_stack.clone();
        let mut corrections = Vec::new();

        for section in corrected.section_names() {
            let Some(fields) = corrected.section_mut(&section) else {
                continue;
            };
            for (key, value) in fields.iter_mut() {
                value.rewrite_leaves(key, |path, name| {
                    if self.registry.is_valid_tech(name) {
                        return None;
                    }
                    let replacement = self.registry.closest_match(name, self.match_threshold)?;
                    corrections.push(Correction {
                        section: section.clone(),
                        key: path.to_string(),
                        original: name.to_string(),
                        corrected: replacement.to_string(),
                    });
                    Some(replacement.to_string())
                });
            }
        }

        CorrectionResult {
            tech_stack: corrected,
            corrections,
        }
    }

    pub fn suggest(&self, tech_stack: &TechStack) -> Suggestions {
        suggest(&self.registry, tech_stack)
    }
}

/// Template pass. Sections missing on either side are skipped, as are fields
/// the template does not mention and `compatibility` maps.
pub fn check_template(tech_stack: &TechStack, template: &TechStack) -> TemplateCompatibility {
    let mut incompatibilities = Vec::new();

    for section in DECLARED_SECTIONS {
        let (Some(candidate), Some(reference)) = (tech_stack.section(section), template.section(section))
        else {
            continue;
        };
        let template_options = names_of(reference, OPTIONS_KEY);

        for (key, selected) in candidate {
            let Some(expected) = reference.get(key) else {
                continue;
            };
            if matches!(selected, FieldValue::Compatibility(_))
                || matches!(expected, FieldValue::Compatibility(_))
            {
                continue;
            }

            let allowed = if key == OPTIONS_KEY {
                template_options.clone()
            } else {
                // Template value(s) then options, each name listed once even
                // when the template repeats its value inside `options`.
                let mut allowed: Vec<String> = expected.names().into_iter().map(String::from).collect();
                for option in &template_options {
                    if !allowed.contains(option) {
                        allowed.push(option.clone());
                    }
                }
                allowed
            };

            for name in selected.names() {
                if !allowed.iter().any(|a| a == name) {
                    incompatibilities.push(Incompatibility {
                        section: section.to_string(),
                        key: key.clone(),
                        selected: name.to_string(),
                        allowed: allowed.clone(),
                    });
                }
            }
        }
    }

    TemplateCompatibility {
        is_compatible: incompatibilities.is_empty(),
        incompatibilities,
    }
}

fn names_of(section: &StackSection, key: &str) -> Vec<String> {
    section
        .get(key)
        .map(|v| v.names().into_iter().map(String::from).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> TechValidator {
        TechValidator::new(Arc::new(TechRegistry::builtin()), DEFAULT_MATCH_THRESHOLD)
    }

    fn stack(value: serde_json::Value) -> TechStack {
        TechStack::from_value(&value).unwrap()
    }

    #[test]
    fn test_all_known_technologies_are_valid() {
        let result = validator().validate(
            &stack(json!({
                "frontend": {"framework": "React", "stateManagement": "Redux"},
                "backend": {"framework": "FastAPI", "orm": "SQLAlchemy"},
                "database": {"primary": "PostgreSQL", "cache": "Redis"},
                "authentication": {"provider": "Auth0", "methods": ["OAuth", "Magic Link"]}
            })),
            None,
        );
        assert!(result.is_valid);
        assert!(result.invalid_technologies.is_empty());
        assert!(result.template_compatibility.is_none());
    }

    #[test]
    fn test_unknown_names_are_reported_in_declared_order() {
        let result = validator().validate(
            &stack(json!({
                "testing": {"unit": "Jestt"},
                "frontend": {
                    "framework": "Reactt",
                    "compatibility": {"uiLibraries": ["Bogus UI"]}
                }
            })),
            None,
        );
        assert!(!result.is_valid);
        let reported: Vec<(&str, &str, &str)> = result
            .invalid_technologies
            .iter()
            .map(|i| (i.section.as_str(), i.key.as_str(), i.technology.as_str()))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("frontend", "compatibility.uiLibraries", "Bogus UI"),
                ("frontend", "framework", "Reactt"),
                ("testing", "unit", "Jestt"),
            ]
        );
        assert_eq!(result.invalid_technologies[1].suggestion.as_deref(), Some("React"));
        assert_eq!(result.invalid_technologies[2].suggestion.as_deref(), Some("Jest"));
    }

    #[test]
    fn test_template_options_accept_listed_choice() {
        let template = stack(json!({"frontend": {"framework": "React", "options": ["React", "Vue.js", "Angular"]}}));
        let candidate = stack(json!({"frontend": {"options": ["Vue.js"]}}));
        let compat = validator()
            .validate(&candidate, Some(&template))
            .template_compatibility
            .unwrap();
        assert!(compat.is_compatible);
    }

    #[test]
    fn test_template_options_reject_unlisted_choice() {
        let template = stack(json!({"frontend": {"framework": "React", "options": ["React", "Vue.js", "Angular"]}}));
        let candidate = stack(json!({"frontend": {"options": ["Svelte"]}}));
        let result = validator().validate(&candidate, Some(&template));

        assert!(result.is_valid, "Svelte is a known technology");
        let compat = result.template_compatibility.unwrap();
        assert!(!compat.is_compatible);
        assert_eq!(compat.incompatibilities.len(), 1);
        assert_eq!(compat.incompatibilities[0].selected, "Svelte");
        assert_eq!(compat.incompatibilities[0].allowed, vec!["React", "Vue.js", "Angular"]);
    }

    #[test]
    fn test_scalar_differing_from_template_allowed_via_options() {
        let template = stack(json!({"frontend": {"framework": "React", "options": ["React", "Vue.js"]}}));
        let candidate = stack(json!({"frontend": {"framework": "Vue.js"}}));
        let compat = check_template(&candidate, &template);
        assert!(compat.is_compatible);
    }

    #[test]
    fn test_scalar_outside_template_lists_template_value_and_options() {
        let template = stack(json!({"backend": {"framework": "Django", "options": ["Flask", "FastAPI"]}}));
        let candidate = stack(json!({"backend": {"framework": "Express.js"}}));
        let compat = check_template(&candidate, &template);
        assert!(!compat.is_compatible);
        assert_eq!(
            compat.incompatibilities[0].allowed,
            vec!["Django", "Flask", "FastAPI"]
        );
    }

    #[test]
    fn test_scalar_without_template_options_allows_only_template_value() {
        let template = stack(json!({"database": {"primary": "PostgreSQL"}}));
        let candidate = stack(json!({"database": {"primary": "MongoDB"}}));
        let compat = check_template(&candidate, &template);
        assert_eq!(compat.incompatibilities[0].allowed, vec!["PostgreSQL"]);
    }

    #[test]
    fn test_allowed_lists_template_value_once_when_repeated_in_options() {
        let template = stack(json!({"frontend": {"framework": "React", "options": ["React", "Vue.js"]}}));
        let candidate = stack(json!({"frontend": {"framework": "Svelte"}}));
        let compat = check_template(&candidate, &template);
        assert_eq!(compat.incompatibilities[0].allowed, vec!["React", "Vue.js"]);
    }

    #[test]
    fn test_template_skips_missing_sections_and_fields() {
        let template = stack(json!({"frontend": {"framework": "React"}}));
        let candidate = stack(json!({
            "frontend": {"stateManagement": "Redux"},
            "backend": {"framework": "Django"}
        }));
        assert!(check_template(&candidate, &template).is_compatible);
    }

    #[test]
    fn test_list_field_checked_against_template_list() {
        let template = stack(json!({"authentication": {"methods": ["OAuth", "SSO"]}}));
        let candidate = stack(json!({"authentication": {"methods": ["OAuth", "Passkeys"]}}));
        let compat = check_template(&candidate, &template);
        assert_eq!(compat.incompatibilities.len(), 1);
        assert_eq!(compat.incompatibilities[0].selected, "Passkeys");
    }

    #[test]
    fn test_invalid_stack_can_still_be_template_compatible() {
        let template = stack(json!({"frontend": {"framework": "MyFramework"}}));
        let candidate = stack(json!({"frontend": {"framework": "MyFramework"}}));
        let result = validator().validate(&candidate, Some(&template));
        assert!(!result.is_valid);
        assert!(result.template_compatibility.unwrap().is_compatible);
    }

    #[test]
    fn test_auto_correct_replaces_close_matches_only() {
        let input = stack(json!({
            "frontend": {"framework": "Reactt", "options": ["vue.js", "Totally Unknown"]},
            "database": {"primary": "PostgreSQL"}
        }));
        let result = validator().auto_correct(&input);

        assert_eq!(
            result.tech_stack.field("frontend", "framework"),
            Some(&FieldValue::Single("React".to_string()))
        );
        assert_eq!(
            result.tech_stack.field("frontend", "options").unwrap().names(),
            vec!["Vue.js", "Totally Unknown"]
        );
        assert_eq!(result.corrections.len(), 2);
        assert!(result
            .corrections
            .iter()
            .all(|c| c.section == "frontend" && c.original != c.corrected));
    }

    #[test]
    fn test_auto_correct_matches_validate_order_and_keys() {
        let input = stack(json!({
            "storage": {"provider": "Cloudflare R3"},
            "testing": {"unit": "Jestt"},
            "frontend": {"compatibility": {"stateManagement": ["Redx"]}}
        }));
        let v = validator();
        let corrections = v.auto_correct(&input).corrections;
        let validation = v.validate(&input, None);
        let reported: Vec<(&str, &str)> = validation
            .invalid_technologies
            .iter()
            .map(|i| (i.section.as_str(), i.key.as_str()))
            .collect();
        let corrected: Vec<(&str, &str)> = corrections
            .iter()
            .map(|c| (c.section.as_str(), c.key.as_str()))
            .collect();

        assert_eq!(
            corrected,
            vec![
                ("frontend", "compatibility.stateManagement"),
                ("testing", "unit"),
                ("storage", "provider"),
            ]
        );
        assert_eq!(corrected, reported);
        assert_eq!(corrections[0].corrected, "Redux");
        assert_eq!(corrections[2].corrected, "Cloudflare R2");
    }

    #[test]
    fn test_serialized_result_omits_absent_optionals() {
        let result = validator().validate(&stack(json!({"frontend": {"framework": "React"}})), None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"is_valid": true, "invalid_technologies": []}));
    }
}
