// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! A single release note

use std::rc::Rc;

use serde_yaml::Mapping;

use crate::commit::Commit;
use crate::error::DetailError;
use crate::schema::{ParsedRecord, Schema, ValidationErrors};
use crate::value::Value;

/// Prefix of attributes delegated to the note's commit
const COMMIT_PREFIX: &str = "commit_";

/// A note file, validated against the note schema
#[derive(Debug, Clone)]
pub struct Note {
    path: String,
    raw: Mapping,
    schema: Rc<Schema>,
    commit: Option<Rc<Commit>>,
    schema_data: ParsedRecord,
}

impl Note {
    /// Parse `raw` against `schema`
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        raw: Mapping,
        schema: Rc<Schema>,
        commit: Option<Rc<Commit>>,
    ) -> Self {
        let schema_data = schema.parse(&raw);
        Self {
            path: path.into(),
            raw,
            schema,
            commit,
            schema_data,
        }
    }

    /// A note whose content is not a YAML mapping.
    ///
    /// It carries no field values and a single record-level error.
    #[must_use]
    pub fn unparsable(
        path: impl Into<String>,
        message: impl Into<String>,
        schema: Rc<Schema>,
        commit: Option<Rc<Commit>>,
    ) -> Self {
        let mut note = Self::new(path, Mapping::new(), schema, commit);
        note.schema_data = ParsedRecord::default();
        note.schema_data.push_error(message);
        note
    }

    /// Path of the note file, relative to the repository root
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The mapping as read from the file, including undeclared keys
    #[must_use]
    pub fn raw(&self) -> &Mapping {
        &self.raw
    }

    /// The validation result against the note schema
    #[must_use]
    pub fn schema_data(&self) -> &ParsedRecord {
        &self.schema_data
    }

    /// The schema this note was validated against
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The commit that added the note file
    #[must_use]
    pub fn commit(&self) -> Option<&Commit> {
        self.commit.as_deref()
    }

    /// Validation errors for this note
    #[must_use]
    pub fn validation_errors(&self) -> &ValidationErrors {
        self.schema_data.errors()
    }

    /// True iff there are no validation errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.schema_data.is_valid()
    }

    /// Resolve an attribute by name.
    ///
    /// Lookup order:
    /// 1. note properties: `path`, `is_valid`, `validation_errors` (text, unset
    ///    when valid), `commit` (the sha, unset without a commit)
    /// 2. validated schema values
    /// 3. `None` for a schema field this note does not set
    /// 4. `commit_<attr>` delegated to the commit (`commit_sha`, `commit_tag`, ...)
    ///
    /// # Errors
    ///
    /// Returns `DetailError::UnknownField` when no step knows the name, or
    /// `DetailError::Git` if resolving `commit_tag` fails.
    pub fn resolve_field(&self, name: &str) -> Result<Option<Value>, DetailError> {
        match name {
            "path" => return Ok(Some(Value::from(self.path.as_str()))),
            "is_valid" => return Ok(Some(Value::Bool(self.is_valid()))),
            "validation_errors" => {
                let errors = self.validation_errors();
                return Ok((!errors.is_empty()).then(|| Value::Text(errors.to_string())));
            }
            "commit" => return Ok(self.commit().map(|commit| Value::from(commit.sha()))),
            _ => {}
        }

        if let Some(value) = self.schema_data.get(name) {
            return Ok(Some(value.clone()));
        }
        if self.schema.contains(name) {
            return Ok(None);
        }

        match (name.strip_prefix(COMMIT_PREFIX), &self.commit) {
            (Some(attr), Some(commit)) => commit.resolve_field(attr),
            // Without a commit, known commit attributes are simply unset
            (Some(attr), None) if attr == "tag" || crate::schema::is_commit_field(attr) => {
                Ok(None)
            }
            _ => Err(DetailError::UnknownField {
                name: name.to_string(),
            }),
        }
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.raw == other.raw
            && self.schema_data == other.schema_data
            && self.commit.as_deref().map(Commit::sha) == other.commit.as_deref().map(Commit::sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detail_git::{CommandOutput, Git, GitError, Runner, Tag, parse_commit_log};
    use similar_asserts::assert_eq;

    const SCHEMA: &str = r#"
- label: type
  choices: [api-break, bug, feature, trivial]
- label: summary
- label: description
  required: false
  condition: ["!=", "type", "trivial"]
"#;

    #[derive(Debug)]
    struct TaggedAt(&'static str);

    impl Runner for TaggedAt {
        fn execute(&self, _args: &[String]) -> Result<CommandOutput, GitError> {
            Ok(CommandOutput {
                status: 0,
                stdout: self.0.to_string(),
                stderr: String::new(),
            })
        }
    }

    fn schema() -> Rc<Schema> {
        Rc::new(Schema::from_yaml(SCHEMA).expect("schema"))
    }

    fn commit() -> Rc<Commit> {
        let log = parse_commit_log(
            "sha: 1945ab9c752534e733c38ba0109dc3b741f0a6eb\nauthor_name: Ada\n<-------->",
        )
        .expect("log");
        Rc::new(
            Commit::from_log(&log[0], &Schema::commit(), Git::new(TaggedAt("v1.1~1")), None)
                .expect("commit"),
        )
    }

    fn note(yaml: &str) -> Note {
        let raw: Mapping = serde_yaml::from_str(yaml).expect("yaml");
        Note::new(".detail/notes/a.yaml", raw, schema(), Some(commit()))
    }

    #[test]
    fn test_valid_note() {
        let note = note("type: bug\nsummary: Fix crash\nextra: kept\n");
        assert!(note.is_valid());
        assert!(note.validation_errors().is_empty());
        assert_eq!(note.raw().len(), 3);
        assert_eq!(note.schema_data().data().len(), 2);
    }

    #[test]
    fn test_invalid_note() {
        let note = note("type: chore\n");
        assert!(!note.is_valid());
        assert_eq!(note.validation_errors().len(), 2);
        assert_eq!(
            note.resolve_field("is_valid").expect("resolve"),
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn test_resolution_order() {
        let note = note("type: bug\nsummary: Fix crash\n");

        assert_eq!(
            note.resolve_field("path").expect("resolve"),
            Some(Value::from(".detail/notes/a.yaml"))
        );
        assert_eq!(
            note.resolve_field("type").expect("resolve"),
            Some(Value::from("bug"))
        );
        // Declared but absent
        assert_eq!(note.resolve_field("description").expect("resolve"), None);
        assert_eq!(
            note.resolve_field("commit_sha").expect("resolve"),
            Some(Value::from("1945ab9c752534e733c38ba0109dc3b741f0a6eb"))
        );
        assert_eq!(
            note.resolve_field("commit_author_name").expect("resolve"),
            Some(Value::from("Ada"))
        );
        assert_eq!(
            note.resolve_field("commit_tag").expect("resolve"),
            Some(Value::Tag(Tag::new("v1.1")))
        );
    }

    #[test]
    fn test_note_properties() {
        let invalid = note("type: chore\nsummary: Fix crash\n");
        let Some(Value::Text(errors)) =
            invalid.resolve_field("validation_errors").expect("resolve")
        else {
            panic!("expected validation errors as text");
        };
        assert_eq!(errors, invalid.validation_errors().to_string());
        assert!(errors.starts_with("type: "));

        let valid = note("type: bug\nsummary: Fix crash\n");
        assert_eq!(valid.resolve_field("validation_errors").expect("resolve"), None);
        assert_eq!(
            valid.resolve_field("commit").expect("resolve"),
            Some(Value::from("1945ab9c752534e733c38ba0109dc3b741f0a6eb"))
        );

        let raw: Mapping = serde_yaml::from_str("type: bug\n").expect("yaml");
        let detached = Note::new(".detail/notes/b.yaml", raw, schema(), None);
        assert_eq!(detached.resolve_field("commit").expect("resolve"), None);
    }

    #[test]
    fn test_unknown_fields() {
        let note = note("type: bug\nsummary: Fix crash\nextra: kept\n");
        for name in ["extra", "commit_message", "nonsense"] {
            assert!(
                matches!(note.resolve_field(name), Err(DetailError::UnknownField { .. })),
                "{name} should be unknown"
            );
        }
    }

    #[test]
    fn test_note_without_commit() {
        let raw: Mapping = serde_yaml::from_str("type: bug\nsummary: Fix\n").expect("yaml");
        let note = Note::new("a.yaml", raw, schema(), None);
        assert_eq!(note.resolve_field("commit_tag").expect("resolve"), None);
        assert_eq!(note.resolve_field("commit_sha").expect("resolve"), None);
    }

    #[test]
    fn test_unparsable_note() {
        let note = Note::unparsable("a.yaml", "Note is not a mapping", schema(), None);
        assert!(!note.is_valid());
        assert_eq!(
            note.validation_errors().to_string(),
            "Note is not a mapping"
        );
    }
}
