//! Compatible-technology suggestions keyed by the chosen framework.
//!
//! Lookup tables are plain data; adding a framework means adding a row.

use std::collections::BTreeMap;

use crate::tech::registry::TechRegistry;
use crate::tech::stack::{FieldValue, TechStack};

/// section → field → suggested names
pub type Suggestions = BTreeMap<String, BTreeMap<String, Vec<String>>>;

type Bundle = &'static [(&'static str, &'static [&'static str])];

struct SuggestionRow {
    frameworks: &'static [&'static str],
    bundle: Bundle,
}

const FRONTEND_TABLE: &[SuggestionRow] = &[
    SuggestionRow {
        frameworks: &["React"],
        bundle: &[
            ("stateManagement", &["Redux", "Zustand", "MobX", "Recoil"]),
            (
                "uiLibrary",
                &["Material UI", "Chakra UI", "Ant Design", "Tailwind CSS"],
            ),
            ("formHandling", &["React Hook Form", "Formik"]),
        ],
    },
    SuggestionRow {
        frameworks: &["Vue.js"],
        bundle: &[
            ("stateManagement", &["Pinia", "Vuex"]),
            ("uiLibrary", &["Vuetify", "Element Plus", "Quasar"]),
            ("formHandling", &["VeeValidate", "FormKit"]),
        ],
    },
    SuggestionRow {
        frameworks: &["Angular"],
        bundle: &[
            ("stateManagement", &["NgRx", "Akita"]),
            ("uiLibrary", &["Angular Material", "PrimeNG"]),
            ("formHandling", &["Reactive Forms"]),
        ],
    },
];

const BACKEND_TABLE: &[SuggestionRow] = &[
    SuggestionRow {
        frameworks: &["Express.js", "NestJS"],
        bundle: &[
            ("orm", &["Prisma", "TypeORM", "Sequelize", "Mongoose"]),
            ("authFramework", &["Passport.js", "Auth0", "JWT"]),
        ],
    },
    SuggestionRow {
        frameworks: &["Django"],
        bundle: &[
            ("orm", &["Django ORM"]),
            ("authFramework", &["Django Auth", "Django REST Framework"]),
        ],
    },
    SuggestionRow {
        frameworks: &["FastAPI"],
        bundle: &[
            ("orm", &["SQLAlchemy", "Tortoise ORM"]),
            ("authFramework", &["FastAPI Users", "OAuth2"]),
        ],
    },
];

const SECTION_TABLES: [(&str, &[SuggestionRow]); 2] =
    [("frontend", FRONTEND_TABLE), ("backend", BACKEND_TABLE)];

/// Suggestions for every section whose `framework` is registry-valid and
/// present in a table. An empty result means nothing to suggest.
pub fn suggest(registry: &TechRegistry, tech_stack: &TechStack) -> Suggestions {
    let mut suggestions = Suggestions::new();

    for (section, table) in SECTION_TABLES {
        let Some(FieldValue::Single(framework)) = tech_stack.field(section, "framework") else {
            continue;
        };
        if !registry.is_valid_tech(framework) {
            continue;
        }
        let Some(row) = table
            .iter()
            .find(|row| row.frameworks.iter().any(|f| *f == framework.as_str()))
        else {
            continue;
        };

        let fields = row
            .bundle
            .iter()
            .map(|(field, names)| {
                (
                    field.to_string(),
                    names.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect();
        suggestions.insert(section.to_string(), fields);
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(value: serde_json::Value) -> Suggestions {
        suggest(&TechRegistry::builtin(), &TechStack::from_value(&value).unwrap())
    }

    #[test]
    fn test_react_suggests_redux() {
        let suggestions = run(json!({"frontend": {"framework": "React"}}));
        assert!(suggestions["frontend"]["stateManagement"].contains(&"Redux".to_string()));
        assert!(!suggestions.contains_key("backend"));
    }

    #[test]
    fn test_nestjs_shares_express_bundle() {
        let suggestions = run(json!({"backend": {"framework": "NestJS"}}));
        assert_eq!(suggestions["backend"]["orm"][0], "Prisma");
        assert!(suggestions["backend"]["authFramework"].contains(&"Passport.js".to_string()));
    }

    #[test]
    fn test_both_sections_are_independent() {
        let suggestions = run(json!({
            "frontend": {"framework": "Vue.js"},
            "backend": {"framework": "FastAPI"}
        }));
        assert_eq!(suggestions["frontend"]["stateManagement"], vec!["Pinia", "Vuex"]);
        assert_eq!(suggestions["backend"]["orm"], vec!["SQLAlchemy", "Tortoise ORM"]);
    }

    #[test]
    fn test_unrecognized_framework_yields_nothing() {
        assert!(run(json!({"frontend": {"framework": "Backbone.js"}})).is_empty());
    }

    #[test]
    fn test_known_but_untabled_framework_yields_nothing() {
        // Svelte is in the registry but has no suggestion row.
        assert!(run(json!({"frontend": {"framework": "Svelte"}})).is_empty());
    }

    #[test]
    fn test_empty_stack_yields_empty_result() {
        assert!(run(json!({})).is_empty());
    }
}
