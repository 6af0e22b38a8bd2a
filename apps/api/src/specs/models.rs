//! Project specification sections and their body shapes.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecSection {
    Timeline,
    Budget,
    Requirements,
    Metadata,
}

impl SpecSection {
    pub const ALL: [SpecSection; 4] = [
        SpecSection::Timeline,
        SpecSection::Budget,
        SpecSection::Requirements,
        SpecSection::Metadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecSection::Timeline => "timeline",
            SpecSection::Budget => "budget",
            SpecSection::Requirements => "requirements",
            SpecSection::Metadata => "metadata",
        }
    }
}

impl FromStr for SpecSection {
    type Err = AppError;

    /// Unknown names are a missing resource, not a malformed request.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown spec section '{s}'")))
    }
}

#[derive(Debug, Error)]
pub enum SpecSectionError {
    #[error("invalid {section} body: {source}")]
    Shape {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Rule(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    pub item: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub breakdown: Vec<BudgetItem>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecRequirements {
    #[serde(default)]
    pub functional: Vec<String>,
    #[serde(default)]
    pub non_functional: Vec<String>,
}

/// Parses `data` as the body of `section`, checks its rules, and returns the
/// normalized document to store.
pub fn validate_section(section: SpecSection, data: Value) -> Result<Value, SpecSectionError> {
    match section {
        SpecSection::Timeline => {
            let timeline: Timeline = parse(section, data)?;
            if let (Some(start), Some(end)) = (timeline.start_date, timeline.end_date) {
                if end < start {
                    return Err(SpecSectionError::Rule(format!(
                        "timeline end_date {end} is before start_date {start}"
                    )));
                }
            }
            normalize(section, &timeline)
        }
        SpecSection::Budget => {
            let budget: Budget = parse(section, data)?;
            if budget.total.is_some_and(|t| t < 0.0) {
                return Err(SpecSectionError::Rule(
                    "budget total cannot be negative".to_string(),
                ));
            }
            if let Some(item) = budget.breakdown.iter().find(|i| i.amount < 0.0) {
                return Err(SpecSectionError::Rule(format!(
                    "budget item '{}' has a negative amount",
                    item.item
                )));
            }
            normalize(section, &budget)
        }
        SpecSection::Requirements => {
            let requirements: SpecRequirements = parse(section, data)?;
            normalize(section, &requirements)
        }
        SpecSection::Metadata => match data {
            Value::Object(_) => Ok(data),
            _ => Err(SpecSectionError::Rule(
                "metadata must be a JSON object".to_string(),
            )),
        },
    }
}

fn parse<T: serde::de::DeserializeOwned>(section: SpecSection, data: Value) -> Result<T, SpecSectionError> {
    serde_json::from_value(data).map_err(|source| SpecSectionError::Shape {
        section: section.as_str(),
        source,
    })
}

fn normalize<T: Serialize>(section: SpecSection, body: &T) -> Result<Value, SpecSectionError> {
    serde_json::to_value(body).map_err(|source| SpecSectionError::Shape {
        section: section.as_str(),
        source,
    })
}
