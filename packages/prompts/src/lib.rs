// ABOUTME: Versioned prompt template artifacts shipped with Taskdeck
// ABOUTME: Loads embedded JSON templates and validates caller parameters

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Parameter '{name}' expects {expected}")]
    InvalidParameter { name: String, expected: String },

    #[error("Parameter '{name}' must be between {min} and {max}")]
    OutOfRange { name: String, min: f64, max: f64 },

    #[error("Failed to parse prompt JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// The JSON type a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Number,
    Boolean,
    Array,
}

impl ParameterKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ParameterKind::String => value.is_string(),
            ParameterKind::Number => value.is_number(),
            ParameterKind::Boolean => value.is_boolean(),
            ParameterKind::Array => value.is_array(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ParameterKind::String => "a string",
            ParameterKind::Number => "a number",
            ParameterKind::Boolean => "a boolean",
            ParameterKind::Array => "an array",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One system/user instruction pair.
///
/// The template text uses an external templating convention (conditional
/// sections, variable interpolation); it is carried as opaque data and not
/// interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptVariant {
    pub system: String,
    pub user: String,
}

/// A versioned prompt template artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub version: String,
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterSpec>,
    pub prompts: BTreeMap<String, PromptVariant>,
}

impl PromptTemplate {
    /// Look up an instruction pair by variant name ("default" always exists
    /// in the shipped artifacts).
    pub fn variant(&self, name: &str) -> Option<&PromptVariant> {
        self.prompts.get(name)
    }

    /// Check a caller-supplied parameter map against the schema: required
    /// parameters present, kinds matching, numeric bounds honored.
    pub fn validate_params(&self, params: &serde_json::Map<String, Value>) -> Result<(), PromptError> {
        for (name, spec) in &self.parameters {
            let value = match params.get(name) {
                Some(v) => v,
                None if spec.required => {
                    return Err(PromptError::MissingParameter(name.clone()));
                }
                None => continue,
            };

            if !spec.kind.matches(value) {
                return Err(PromptError::InvalidParameter {
                    name: name.clone(),
                    expected: spec.kind.name().to_string(),
                });
            }

            if let Some(n) = value.as_f64() {
                let min = spec.minimum.unwrap_or(f64::NEG_INFINITY);
                let max = spec.maximum.unwrap_or(f64::INFINITY);
                if n < min || n > max {
                    return Err(PromptError::OutOfRange {
                        name: name.clone(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

const TEMPLATES: &[(&str, &str)] = &[(
    "analyze-complexity",
    include_str!("templates/analyze_complexity.json"),
)];

/// Load an embedded template by id.
pub fn load(id: &str) -> Result<PromptTemplate, PromptError> {
    let raw = TEMPLATES
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, raw)| *raw)
        .ok_or_else(|| PromptError::NotFound(id.to_string()))?;
    Ok(serde_json::from_str(raw)?)
}

/// Ids of all embedded templates.
pub fn available() -> Vec<&'static str> {
    TEMPLATES.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn loads_analyze_complexity() {
        let template = load("analyze-complexity").unwrap();

        assert_eq!(template.id, "analyze-complexity");
        assert_eq!(template.version, "1.2.0");
        assert!(template.variant("default").is_some());
        assert!(template.parameters.get("tasks").unwrap().required);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = load("does-not-exist").unwrap_err();
        assert!(matches!(err, PromptError::NotFound(_)));
    }

    #[test]
    fn missing_required_parameter_rejected() {
        let template = load("analyze-complexity").unwrap();

        let err = template.validate_params(&params(json!({}))).unwrap_err();

        assert!(matches!(err, PromptError::MissingParameter(name) if name == "tasks"));
    }

    #[test]
    fn wrong_kind_rejected() {
        let template = load("analyze-complexity").unwrap();

        let err = template
            .validate_params(&params(json!({"tasks": "not an array"})))
            .unwrap_err();

        assert!(matches!(err, PromptError::InvalidParameter { name, .. } if name == "tasks"));
    }

    #[test]
    fn threshold_bounds_enforced() {
        let template = load("analyze-complexity").unwrap();

        let err = template
            .validate_params(&params(json!({"tasks": [], "threshold": 11})))
            .unwrap_err();

        assert!(matches!(err, PromptError::OutOfRange { name, .. } if name == "threshold"));
    }

    #[test]
    fn valid_parameters_accepted() {
        let template = load("analyze-complexity").unwrap();

        template
            .validate_params(&params(json!({
                "tasks": [{"id": 1, "title": "Build the parser"}],
                "threshold": 6,
                "useResearch": true
            })))
            .unwrap();
    }

    #[test]
    fn available_lists_shipped_templates() {
        assert_eq!(available(), vec!["analyze-complexity"]);
    }
}
