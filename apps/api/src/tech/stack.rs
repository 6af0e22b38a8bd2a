//! Tech stack selections: section → field → value.
//!
//! A value is a single name, a list of names, or a `compatibility` map of
//! subcategory → names. Anything else is rejected at parse time with the path
//! of the offending value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::extraction::value_kind;

/// Sections in their declared order. Validation walks these first.
pub const DECLARED_SECTIONS: [&str; 6] = [
    "frontend",
    "backend",
    "database",
    "authentication",
    "deployment",
    "testing",
];

pub const OPTIONS_KEY: &str = "options";

#[derive(Debug, Error, PartialEq)]
pub enum StackShapeError {
    #[error("{path} must be an object, found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error("{path} must be a string, a list of strings or a map of string lists, found {found}")]
    InvalidField { path: String, found: &'static str },

    #[error("{path}[{index}] must be a string, found {found}")]
    InvalidListEntry {
        path: String,
        index: usize,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    List(Vec<String>),
    Compatibility(BTreeMap<String, Vec<String>>),
}

impl FieldValue {
    /// Every leaf name held by this field, in storage order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(name) => vec![name.as_str()],
            FieldValue::List(names) => names.iter().map(String::as_str).collect(),
            FieldValue::Compatibility(groups) => groups
                .values()
                .flat_map(|names| names.iter().map(String::as_str))
                .collect(),
        }
    }

    /// Leaf names paired with the key they should be reported under.
    /// Compatibility entries report as `<key>.<subcategory>`.
    pub fn leaves<'a>(&'a self, key: &str) -> Vec<(String, &'a str)> {
        match self {
            FieldValue::Compatibility(groups) => groups
                .iter()
                .flat_map(|(sub, names)| {
                    let path = format!("{key}.{sub}");
                    names.iter().map(move |n| (path.clone(), n.as_str()))
                })
                .collect(),
            other => other
                .names()
                .into_iter()
                .map(|n| (key.to_string(), n))
                .collect(),
        }
    }

    /// Rewrites each leaf name for which `fix` returns a replacement. `fix`
    /// sees the same reporting key as `leaves`.
    pub fn rewrite_leaves(&mut self, key: &str, mut fix: impl FnMut(&str, &str) -> Option<String>) {
        let mut apply = |path: &str, name: &mut String| {
            if let Some(replacement) = fix(path, name.as_str()) {
                *name = replacement;
            }
        };
        match self {
            FieldValue::Single(name) => apply(key, name),
            FieldValue::List(names) => names.iter_mut().for_each(|name| apply(key, name)),
            FieldValue::Compatibility(groups) => {
                for (sub, names) in groups.iter_mut() {
                    let path = format!("{key}.{sub}");
                    names.iter_mut().for_each(|name| apply(&path, name));
                }
            }
        }
    }

    fn from_value(path: &str, value: &Value) -> Result<Self, StackShapeError> {
        match value {
            Value::String(s) => Ok(FieldValue::Single(s.clone())),
            Value::Array(items) => Ok(FieldValue::List(string_list(path, items)?)),
            Value::Object(map) => {
                let mut groups = BTreeMap::new();
                for (sub, names) in map {
                    let sub_path = format!("{path}.{sub}");
                    let names = match names {
                        Value::Array(items) => string_list(&sub_path, items)?,
                        other => {
                            return Err(StackShapeError::InvalidField {
                                path: sub_path,
                                found: value_kind(other),
                            })
                        }
                    };
                    groups.insert(sub.clone(), names);
                }
                Ok(FieldValue::Compatibility(groups))
            }
            other => Err(StackShapeError::InvalidField {
                path: path.to_string(),
                found: value_kind(other),
            }),
        }
    }
}

fn string_list(path: &str, items: &[Value]) -> Result<Vec<String>, StackShapeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(StackShapeError::InvalidListEntry {
                path: path.to_string(),
                index,
                found: value_kind(other),
            }),
        })
        .collect()
}

pub type StackSection = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechStack {
    sections: BTreeMap<String, StackSection>,
}

impl TechStack {
    /// Parses a JSON tech stack, failing on the first malformed value.
    /// `null` sections and fields count as absent.
    pub fn from_value(value: &Value) -> Result<Self, StackShapeError> {
        let root = value.as_object().ok_or(StackShapeError::NotAnObject {
            path: "tech_stack".to_string(),
            found: value_kind(value),
        })?;

        let mut sections = BTreeMap::new();
        for (section_name, section_value) in root {
            if section_value.is_null() {
                continue;
            }
            let fields = section_value
                .as_object()
                .ok_or_else(|| StackShapeError::NotAnObject {
                    path: section_name.clone(),
                    found: value_kind(section_value),
                })?;

            let mut section = StackSection::new();
            for (key, field) in fields {
                if field.is_null() {
                    continue;
                }
                let path = format!("{section_name}.{key}");
                section.insert(key.clone(), FieldValue::from_value(&path, field)?);
            }
            sections.insert(section_name.clone(), section);
        }

        Ok(Self { sections })
    }

    pub fn section(&self, name: &str) -> Option<&StackSection> {
        self.sections.get(name)
    }

    pub fn field(&self, section: &str, key: &str) -> Option<&FieldValue> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Declared sections first, then any others in lexical order.
    pub fn ordered_sections(&self) -> Vec<(&str, &StackSection)> {
        let declared = DECLARED_SECTIONS
            .iter()
            .filter_map(|name| self.sections.get_key_value(*name));
        let rest = self
            .sections
            .iter()
            .filter(|(name, _)| !DECLARED_SECTIONS.contains(&name.as_str()));
        declared
            .chain(rest)
            .map(|(name, section)| (name.as_str(), section))
            .collect()
    }

    /// Section names in `ordered_sections` order.
    pub fn section_names(&self) -> Vec<String> {
        self.ordered_sections()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut StackSection> {
        self.sections.get_mut(name)
    }
}

impl Serialize for TechStack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sections.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TechStack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
