// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Schema field descriptors and per-field validation

use detail_git::parse_date;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use super::condition::{Condition, scalar_text};
use crate::error::SchemaError;
use crate::value::Value;

/// The type a field's value is converted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text
    #[default]
    #[serde(alias = "str")]
    String,
    /// A timestamp, parsed permissively
    Datetime,
    /// A whole number
    #[serde(alias = "int")]
    Integer,
    /// `true`/`false` (also `yes`/`no`)
    #[serde(alias = "bool")]
    Boolean,
}

/// A field descriptor as written in `schema.yaml`
#[derive(Debug, Deserialize)]
struct FieldSpec {
    label: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(rename = "type", default)]
    kind: FieldType,
    #[serde(default)]
    choices: Vec<YamlValue>,
    #[serde(default)]
    condition: Option<YamlValue>,
    #[serde(default)]
    multiline: bool,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    matches: Option<String>,
}

fn default_required() -> bool {
    true
}

/// One validated field of a schema
#[derive(Debug, Clone)]
pub struct Field {
    label: String,
    name: Option<String>,
    help: Option<String>,
    kind: FieldType,
    choices: Vec<String>,
    condition: Option<Condition>,
    multiline: bool,
    required: bool,
    matches: Option<(String, Regex)>,
}

impl Field {
    /// Create a required field with no constraints
    #[must_use]
    pub fn new(label: impl Into<String>, kind: FieldType) -> Self {
        Self {
            label: label.into(),
            name: None,
            help: None,
            kind,
            choices: Vec::new(),
            condition: None,
            multiline: false,
            required: true,
            matches: None,
        }
    }

    /// Set the display name and help text
    #[must_use]
    pub fn describe(mut self, name: impl Into<String>, help: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.help = Some(help.into());
        self
    }

    /// Set whether the field must be present
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Build a field from one `schema.yaml` entry
    pub(crate) fn from_yaml(entry: YamlValue) -> Result<Self, SchemaError> {
        let has_label = entry
            .as_mapping()
            .is_some_and(|mapping| mapping.contains_key("label"));
        if !has_label {
            return Err(SchemaError::MissingLabel {
                entry: serde_yaml::to_string(&entry)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            });
        }

        let spec: FieldSpec = serde_yaml::from_value(entry)?;
        let invalid = |message: String| SchemaError::InvalidField {
            label: spec.label.clone(),
            message,
        };

        let choices = spec
            .choices
            .iter()
            .map(|choice| scalar_text(choice).ok_or_else(|| invalid("choices must be scalars".into())))
            .collect::<Result<Vec<_>, _>>()?;
        let condition = spec
            .condition
            .as_ref()
            .map(Condition::parse)
            .transpose()
            .map_err(&invalid)?;
        let matches = spec
            .matches
            .as_ref()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})"))
                    .map(|regex| (pattern.clone(), regex))
                    .map_err(|e| invalid(format!("invalid pattern: {e}")))
            })
            .transpose()?;

        Ok(Self {
            label: spec.label.clone(),
            name: spec.name.clone(),
            help: spec.help.clone(),
            kind: spec.kind,
            choices,
            condition,
            multiline: spec.multiline,
            required: spec.required,
            matches,
        })
    }

    /// The key used in note files
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Human-readable name, falling back to the label
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }

    /// Help text shown when prompting
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The value type
    #[must_use]
    pub fn kind(&self) -> FieldType {
        self.kind
    }

    /// Allowed values (empty when unconstrained)
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Whether a missing value is an error
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the value is expected to span lines
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Whether the field is part of a record, given the values so far
    #[must_use]
    pub fn applies_to(&self, data: &IndexMap<String, Value>) -> bool {
        self.condition
            .as_ref()
            .is_none_or(|condition| condition.evaluate(data))
    }

    /// Validate a raw value.
    ///
    /// Null and blank strings count as missing. Returns `Ok(None)` for a
    /// missing optional field.
    ///
    /// # Errors
    ///
    /// Returns the validation message for this field.
    pub fn validate(&self, raw: Option<&YamlValue>) -> Result<Option<Value>, String> {
        let Some(raw) = raw.filter(|raw| !is_blank(raw)) else {
            return if self.required {
                Err("This field is required.".to_string())
            } else {
                Ok(None)
            };
        };

        let value = self.convert(raw)?;
        let text = value.to_string();

        if !self.choices.is_empty() && !self.choices.contains(&text) {
            return Err(format!(
                "Value \"{text}\" is not a valid choice. Choices are: {}.",
                self.choices.join(", ")
            ));
        }
        if let Some((pattern, regex)) = &self.matches {
            if !regex.is_match(&text) {
                return Err(format!(
                    "Value \"{text}\" does not match pattern \"{pattern}\"."
                ));
            }
        }
        Ok(Some(value))
    }

    fn convert(&self, raw: &YamlValue) -> Result<Value, String> {
        let text = scalar_text(raw);
        match self.kind {
            FieldType::String => text
                .map(Value::Text)
                .ok_or_else(|| "Value must be a string.".to_string()),
            FieldType::Datetime => {
                let text = text.ok_or_else(|| "Value must be a datetime.".to_string())?;
                parse_date(&text)
                    .map(Value::DateTime)
                    .ok_or_else(|| format!("Value \"{text}\" is not a valid datetime."))
            }
            FieldType::Integer => match raw {
                YamlValue::Number(number) => number.as_i64(),
                YamlValue::String(s) => s.trim().parse().ok(),
                _ => None,
            }
            .map(Value::Integer)
            .ok_or_else(|| format!("Value \"{}\" is not a valid integer.", text.unwrap_or_default())),
            FieldType::Boolean => match raw {
                YamlValue::Bool(flag) => Some(*flag),
                YamlValue::String(s) => match s.trim().to_lowercase().as_str() {
                    "true" | "yes" | "y" => Some(true),
                    "false" | "no" | "n" => Some(false),
                    _ => None,
                },
                _ => None,
            }
            .map(Value::Bool)
            .ok_or_else(|| format!("Value \"{}\" is not a valid boolean.", text.unwrap_or_default())),
        }
    }
}

fn is_blank(raw: &YamlValue) -> bool {
    match raw {
        YamlValue::Null => true,
        YamlValue::String(text) => text.trim().is_empty(),
        _ => false,
    }
}
