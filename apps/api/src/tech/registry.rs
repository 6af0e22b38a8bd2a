//! Technology Registry: the canonical catalogue of known technology names.
//!
//! Shape: category → subcategory → names. `all_technologies` is derived from
//! that nesting and is rebuilt on every mutation; it is never edited directly.
//!
//! The registry is built once at startup (from the newest persisted snapshot,
//! or the built-in defaults) and then shared read-only via `Arc`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tech::defaults::{BUILTIN_CATEGORIES, REGISTRY_VERSION};

/// Categories in their declared order. Snapshot categories outside this list
/// are kept and ordered after these.
pub const DECLARED_CATEGORIES: [&str; 8] = [
    "frontend",
    "backend",
    "database",
    "authentication",
    "deployment",
    "testing",
    "storage",
    "serverless",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechCategory {
    pub name: String,
    pub subcategories: BTreeMap<String, Vec<String>>,
}

/// Persisted form of the registry.
///
/// Categories are flattened to top-level keys next to `version`,
/// `last_updated` and `all_technologies`. `all_technologies` is informational
/// only and is recomputed on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub version: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub all_technologies: Vec<String>,
    #[serde(flatten)]
    pub categories: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone)]
pub struct TechRegistry {
    version: String,
    last_updated: DateTime<Utc>,
    categories: Vec<TechCategory>,
    all_technologies: BTreeSet<String>,
}

impl TechRegistry {
    pub fn new(
        version: impl Into<String>,
        last_updated: DateTime<Utc>,
        categories: Vec<TechCategory>,
    ) -> Self {
        let mut registry = Self {
            version: version.into(),
            last_updated,
            categories,
            all_technologies: BTreeSet::new(),
        };
        registry.recompute();
        registry
    }

    /// Registry built from the compiled-in catalogue.
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, subcategories)| TechCategory {
                name: name.to_string(),
                subcategories: subcategories
                    .iter()
                    .map(|(sub, names)| {
                        (
                            sub.to_string(),
                            names.iter().map(|n| n.to_string()).collect(),
                        )
                    })
                    .collect(),
            })
            .collect();
        Self::new(REGISTRY_VERSION, Utc::now(), categories)
    }

    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Self {
        let RegistrySnapshot {
            version,
            last_updated,
            mut categories,
            ..
        } = snapshot;

        let mut ordered = Vec::with_capacity(categories.len());
        for name in DECLARED_CATEGORIES {
            if let Some(subcategories) = categories.remove(name) {
                ordered.push(TechCategory {
                    name: name.to_string(),
                    subcategories,
                });
            }
        }
        // Remaining categories come out of the BTreeMap already sorted.
        ordered.extend(
            categories
                .into_iter()
                .map(|(name, subcategories)| TechCategory {
                    name,
                    subcategories,
                }),
        );

        Self::new(version, last_updated, ordered)
    }

    pub fn to_snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            version: self.version.clone(),
            last_updated: self.last_updated,
            all_technologies: self.all_technologies.iter().cloned().collect(),
            categories: self
                .categories
                .iter()
                .map(|c| (c.name.clone(), c.subcategories.clone()))
                .collect(),
        }
    }

    /// Rebuilds the flattened name set from the nested categories.
    pub fn recompute(&mut self) {
        self.all_technologies = self
            .categories
            .iter()
            .flat_map(|c| c.subcategories.values())
            .flatten()
            .cloned()
            .collect();
    }

    /// Replaces one subcategory's names, creating the category or subcategory
    /// if needed, and refreshes the flattened set.
    #[cfg(test)]
    pub fn set_subcategory(&mut self, category: &str, subcategory: &str, names: Vec<String>) {
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => {
                existing
                    .subcategories
                    .insert(subcategory.to_string(), names);
            }
            None => self.categories.push(TechCategory {
                name: category.to_string(),
                subcategories: BTreeMap::from([(subcategory.to_string(), names)]),
            }),
        }
        self.last_updated = Utc::now();
        self.recompute();
    }

    pub fn is_valid_tech(&self, name: &str) -> bool {
        self.all_technologies.contains(name)
    }

    pub fn all_technologies(&self) -> &BTreeSet<String> {
        &self.all_technologies
    }

    pub fn categories(&self) -> &[TechCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&TechCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Closest registry name to `name` by case-insensitive Jaro-Winkler
    /// similarity, if it reaches `threshold`. A case-insensitive exact hit
    /// always wins. Ties resolve to the lexically first name.
    pub fn closest_match(&self, name: &str, threshold: f64) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let mut best: Option<(&str, f64)> = None;
        for candidate in &self.all_technologies {
            let candidate_lower = candidate.to_lowercase();
            if candidate_lower == needle {
                return Some(candidate.as_str());
            }
            let score = strsim::jaro_winkler(&needle, &candidate_lower);
            if score >= threshold && best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate.as_str(), score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TechRegistry {
        TechRegistry::new(
            "test",
            Utc::now(),
            vec![
                TechCategory {
                    name: "frontend".to_string(),
                    subcategories: BTreeMap::from([(
                        "frameworks".to_string(),
                        vec!["React".to_string(), "Vue.js".to_string()],
                    )]),
                },
                TechCategory {
                    name: "database".to_string(),
                    subcategories: BTreeMap::from([
                        ("sql".to_string(), vec!["PostgreSQL".to_string()]),
                        ("nosql".to_string(), vec!["MongoDB".to_string()]),
                    ]),
                },
            ],
        )
    }

    #[test]
    fn test_flattened_set_is_union_of_subcategories() {
        let registry = sample();
        let expected: BTreeSet<String> = ["React", "Vue.js", "PostgreSQL", "MongoDB"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(registry.all_technologies(), &expected);
    }

    #[test]
    fn test_is_valid_tech_matches_membership() {
        let registry = sample();
        assert!(registry.is_valid_tech("React"));
        assert!(registry.is_valid_tech("MongoDB"));
        assert!(!registry.is_valid_tech("react"));
        assert!(!registry.is_valid_tech("Oracle"));
    }

    #[test]
    fn test_set_subcategory_refreshes_flattened_set() {
        let mut registry = sample();
        registry.set_subcategory("database", "sql", vec!["MySQL".to_string()]);
        assert!(registry.is_valid_tech("MySQL"));
        assert!(!registry.is_valid_tech("PostgreSQL"));

        registry.set_subcategory("serverless", "functions", vec!["AWS Lambda".to_string()]);
        assert!(registry.is_valid_tech("AWS Lambda"));
        assert_eq!(registry.categories().len(), 3);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut registry = sample();
        let before = registry.all_technologies().clone();
        registry.recompute();
        registry.recompute();
        assert_eq!(registry.all_technologies(), &before);
    }

    #[test]
    fn test_builtin_registry_covers_declared_categories() {
        let registry = TechRegistry::builtin();
        for name in DECLARED_CATEGORIES {
            assert!(registry.category(name).is_some(), "missing category {name}");
        }
        assert!(registry.is_valid_tech("React"));
        assert!(registry.is_valid_tech("FastAPI"));
        assert!(registry.is_valid_tech("Redux"));
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_declared_order() {
        let registry = TechRegistry::builtin();
        let json = serde_json::to_value(registry.to_snapshot()).unwrap();
        assert!(json.get("frontend").is_some());
        assert!(json["all_technologies"].as_array().unwrap().len() > 10);

        let restored: RegistrySnapshot = serde_json::from_value(json).unwrap();
        let restored = TechRegistry::from_snapshot(restored);
        let names: Vec<&str> = restored.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DECLARED_CATEGORIES.to_vec());
        assert_eq!(restored.all_technologies(), registry.all_technologies());
    }

    #[test]
    fn test_snapshot_flattened_set_is_not_authoritative() {
        let snapshot: RegistrySnapshot = serde_json::from_value(serde_json::json!({
            "version": "2",
            "last_updated": "2024-01-01T00:00:00Z",
            "all_technologies": ["Ghost"],
            "frontend": {"frameworks": ["React"]}
        }))
        .unwrap();
        let registry = TechRegistry::from_snapshot(snapshot);
        assert!(registry.is_valid_tech("React"));
        assert!(!registry.is_valid_tech("Ghost"));
    }

    #[test]
    fn test_closest_match_fixes_typos() {
        let registry = sample();
        assert_eq!(registry.closest_match("Reactt", 0.85), Some("React"));
        assert_eq!(registry.closest_match("postgresql", 0.85), Some("PostgreSQL"));
        assert_eq!(registry.closest_match("Postgres", 0.85), Some("PostgreSQL"));
    }

    #[test]
    fn test_closest_match_rejects_distant_names() {
        let registry = sample();
        assert_eq!(registry.closest_match("zzzz", 0.85), None);
        assert_eq!(registry.closest_match("   ", 0.85), None);
    }
}
