// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Collecting field values from a person (or from defaults)

use std::io;

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value as YamlValue};

use super::condition::scalar_text;
use super::field::Field;
use super::{ParsedRecord, Schema, ValidationError, ValidationErrors};

/// Source of answers for [`Schema::prompt`]
pub trait Prompter {
    /// Whether invalid answers should be asked again
    fn is_interactive(&self) -> bool;

    /// Ask for one field's value.
    ///
    /// Return `None` to accept `default` as-is.
    ///
    /// # Errors
    ///
    /// Returns the IO error of the underlying input.
    fn ask(&mut self, field: &Field, default: Option<&str>) -> io::Result<Option<String>>;

    /// Tell the person an answer was rejected
    ///
    /// # Errors
    ///
    /// Returns the IO error of the underlying output.
    fn reject(&mut self, _field: &Field, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Answers every question with its default, without interaction
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(&mut self, _field: &Field, _default: Option<&str>) -> io::Result<Option<String>> {
        Ok(None)
    }
}

impl Schema {
    /// Collect and validate a record, one field at a time.
    ///
    /// Conditions are evaluated against the answers given so far. Interactive
    /// prompters are asked again until the answer validates; for others the
    /// error is recorded and the field left out.
    ///
    /// # Errors
    ///
    /// Returns the prompter's IO error.
    pub fn prompt(
        &self,
        defaults: &Mapping,
        prompter: &mut dyn Prompter,
    ) -> io::Result<ParsedRecord> {
        let mut data = IndexMap::new();
        let mut errors = ValidationErrors::default();

        for field in self.fields() {
            if !field.applies_to(&data) {
                continue;
            }
            let default = defaults.get(field.label()).and_then(scalar_text);

            loop {
                let answer = prompter
                    .ask(field, default.as_deref())?
                    .or_else(|| default.clone())
                    .map(YamlValue::String);

                match field.validate(answer.as_ref()) {
                    Ok(Some(value)) => {
                        data.insert(field.label().to_string(), value);
                        break;
                    }
                    Ok(None) => break,
                    Err(message) if prompter.is_interactive() => {
                        prompter.reject(field, &message)?;
                    }
                    Err(message) => {
                        errors.push(ValidationError::field(field.label(), message));
                        break;
                    }
                }
            }
        }

        Ok(ParsedRecord::new(data, errors))
    }
}
