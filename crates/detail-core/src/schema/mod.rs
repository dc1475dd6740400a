// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Record schemas
//!
//! A [`Schema`] is an ordered list of [`Field`]s. Parsing a raw YAML mapping
//! against it yields a [`ParsedRecord`]: the values that validated, plus one
//! [`ValidationError`] per field that did not. Validation problems are data,
//! never `Err`.
//!
//! Two schemas exist: the fixed [`Schema::commit`] schema describing git
//! metadata, and the user's note schema loaded with [`Schema::load`].

mod condition;
mod field;
mod prompt;

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::debug;

pub use condition::Condition;
pub use field::{Field, FieldType};
pub use prompt::{DefaultsPrompter, Prompter};

use crate::error::SchemaError;
use crate::value::Value;

/// Built-in commit fields: label, display name, help, type
const COMMIT_FIELDS: &[(&str, &str, &str, FieldType)] = &[
    ("sha", "SHA", "Full SHA of the commit.", FieldType::String),
    (
        "author_name",
        "Author Name",
        "The author name of the commit.",
        FieldType::String,
    ),
    (
        "author_email",
        "Author Email",
        "The author email of the commit.",
        FieldType::String,
    ),
    (
        "author_date",
        "Author Date",
        "The time at which the commit was authored.",
        FieldType::Datetime,
    ),
    (
        "committer_name",
        "Committer Name",
        "The name of the person who performed the commit.",
        FieldType::String,
    ),
    (
        "committer_email",
        "Committer Email",
        "The email of the person who performed the commit.",
        FieldType::String,
    ),
    (
        "committer_date",
        "Committer Date",
        "The time at which the commit was performed.",
        FieldType::Datetime,
    ),
];

/// Whether `label` is one of the built-in commit fields
#[must_use]
pub fn is_commit_field(label: &str) -> bool {
    COMMIT_FIELDS.iter().any(|(name, ..)| *name == label)
}

/// An ordered set of fields
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema from fields
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The schema for commit metadata read from `git log`.
    ///
    /// Only `sha` is required, so a commit with an empty email or an
    /// unparsable date still produces a record.
    #[must_use]
    pub fn commit() -> Self {
        let fields = COMMIT_FIELDS
            .iter()
            .map(|(label, name, help, kind)| {
                Field::new(*label, *kind)
                    .describe(*name, *help)
                    .required(*label == "sha")
            })
            .collect();
        Self::new(fields)
    }

    /// Load a user schema from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the file is absent or unreadable, is not a
    /// list, or has an entry without a `label`.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_yaml(&text)?;
        debug!(path = %path.display(), fields = schema.len(), "Loaded note schema");
        Ok(schema)
    }

    /// Parse a user schema from YAML text
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the text is not a list of labelled entries.
    pub fn from_yaml(text: &str) -> Result<Self, SchemaError> {
        let YamlValue::Sequence(entries) = serde_yaml::from_str::<YamlValue>(text)? else {
            return Err(SchemaError::NotASequence);
        };
        let fields = entries
            .into_iter()
            .map(Field::from_yaml)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields))
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field labels in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::label)
    }

    /// Look up a field by label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.label() == label)
    }

    /// Whether the schema declares `label`
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a raw mapping.
    ///
    /// Fields are visited in order; a field whose condition is false given
    /// the values validated so far is skipped. Keys the schema does not
    /// declare are ignored.
    #[must_use]
    pub fn parse(&self, raw: &Mapping) -> ParsedRecord {
        let mut record = ParsedRecord::default();

        for field in &self.fields {
            if !field.applies_to(&record.data) {
                continue;
            }
            match field.validate(raw.get(field.label())) {
                Ok(Some(value)) => {
                    record.data.insert(field.label().to_string(), value);
                }
                Ok(None) => {}
                Err(message) => record.errors.push(ValidationError::field(field.label(), message)),
            }
        }

        record
    }
}

/// The outcome of parsing a mapping against a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedRecord {
    data: IndexMap<String, Value>,
    errors: ValidationErrors,
}

impl ParsedRecord {
    /// Build a record directly (used by prompting)
    #[must_use]
    pub fn new(data: IndexMap<String, Value>, errors: ValidationErrors) -> Self {
        Self { data, errors }
    }

    /// Validated values in schema order
    #[must_use]
    pub fn data(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    /// Look up a validated value
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.data.get(label)
    }

    /// Iterate over validated `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Errors collected during validation
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// True iff there are no validation errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error not tied to a single field
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(ValidationError::record(message));
    }
}

/// One validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The field at fault, or `None` for the record as a whole
    pub field: Option<String>,
    /// What went wrong
    pub message: String,
}

impl ValidationError {
    /// An error for one field
    #[must_use]
    pub fn field(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(label.into()),
            message: message.into(),
        }
    }

    /// An error for the whole record
    #[must_use]
    pub fn record(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(label) => write!(f, "{label}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// All validation failures of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Add an error
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Number of errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the errors
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
