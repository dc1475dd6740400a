// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Conditional inclusion of schema fields
//!
//! A condition is written as a YAML list: `["!=", "type", "trivial"]`,
//! `["in", "type", ["bug", "feature"]]`, or a combinator such as
//! `["and", [...], [...]]` / `["not", [...]]`.

use indexmap::IndexMap;
use serde_yaml::Value as YamlValue;

use crate::value::Value;

/// A predicate over the values validated so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `["==", label, value]` or `["!=", label, value]`
    Equals {
        /// Field the condition looks at
        label: String,
        /// Expected value, compared as text
        value: String,
        /// True for `!=`
        negate: bool,
    },
    /// `["in", label, [values]]` or `["not in", label, [values]]`
    OneOf {
        /// Field the condition looks at
        label: String,
        /// Accepted values, compared as text
        values: Vec<String>,
        /// True for `not in`
        negate: bool,
    },
    /// Every nested condition holds
    All(Vec<Condition>),
    /// At least one nested condition holds
    Any(Vec<Condition>),
    /// The nested condition does not hold
    Not(Box<Condition>),
}

impl Condition {
    /// Parse a condition from its YAML form
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the expression is malformed.
    pub fn parse(expr: &YamlValue) -> Result<Self, String> {
        let YamlValue::Sequence(items) = expr else {
            return Err("condition must be a list".to_string());
        };
        let op = items
            .first()
            .and_then(YamlValue::as_str)
            .ok_or("condition must start with an operator")?
            .to_lowercase();
        let args = &items[1..];

        match op.as_str() {
            "and" | "or" => {
                if args.is_empty() {
                    return Err(format!("\"{op}\" needs at least one condition"));
                }
                let nested = args.iter().map(Self::parse).collect::<Result<Vec<_>, _>>()?;
                Ok(if op == "and" {
                    Self::All(nested)
                } else {
                    Self::Any(nested)
                })
            }
            "not" => match args {
                [inner] => Ok(Self::Not(Box::new(Self::parse(inner)?))),
                _ => Err("\"not\" takes exactly one condition".to_string()),
            },
            "==" | "!=" => {
                let (label, value) = binary_args(&op, args)?;
                let value = scalar_text(value)
                    .ok_or_else(|| format!("\"{op}\" compares against a scalar value"))?;
                Ok(Self::Equals {
                    label,
                    value,
                    negate: op == "!=",
                })
            }
            "in" | "not in" => {
                let (label, values) = binary_args(&op, args)?;
                let values = values
                    .as_sequence()
                    .ok_or_else(|| format!("\"{op}\" compares against a list"))?
                    .iter()
                    .map(|value| {
                        scalar_text(value).ok_or_else(|| format!("\"{op}\" list must hold scalars"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::OneOf {
                    label,
                    values,
                    negate: op == "not in",
                })
            }
            other => Err(format!("unknown operator \"{other}\"")),
        }
    }

    /// Evaluate against validated field values
    #[must_use]
    pub fn evaluate(&self, data: &IndexMap<String, Value>) -> bool {
        match self {
            Self::Equals {
                label,
                value,
                negate,
            } => {
                let actual = data.get(label).map(ToString::to_string);
                (actual.as_deref() == Some(value.as_str())) != *negate
            }
            Self::OneOf {
                label,
                values,
                negate,
            } => {
                let found = data
                    .get(label)
                    .map(ToString::to_string)
                    .is_some_and(|actual| values.contains(&actual));
                found != *negate
            }
            Self::All(nested) => nested.iter().all(|c| c.evaluate(data)),
            Self::Any(nested) => nested.iter().any(|c| c.evaluate(data)),
            Self::Not(inner) => !inner.evaluate(data),
        }
    }
}

fn binary_args<'a>(op: &str, args: &'a [YamlValue]) -> Result<(String, &'a YamlValue), String> {
    match args {
        [label, value] => {
            let label = label
                .as_str()
                .ok_or_else(|| format!("\"{op}\" needs a field label"))?;
            Ok((label.to_string(), value))
        }
        _ => Err(format!("\"{op}\" takes a field label and a value")),
    }
}

/// Text form of a YAML scalar
pub(crate) fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(text) => Some(text.clone()),
        YamlValue::Bool(flag) => Some(flag.to_string()),
        YamlValue::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
