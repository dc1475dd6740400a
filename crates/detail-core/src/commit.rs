// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commits read from `git log`

use std::cell::OnceCell;
use std::fmt;

use detail_git::{Git, GitError, LogRecord, Tag};
use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::DetailError;
use crate::schema::{ParsedRecord, Schema, is_commit_field};
use crate::value::Value;

/// One commit's validated metadata plus its lazily resolved release tag
pub struct Commit {
    record: ParsedRecord,
    tag_match: Option<String>,
    git: Git,
    tag: OnceCell<Option<Tag>>,
}

impl Commit {
    /// Build a commit from an already validated record
    #[must_use]
    pub fn new(record: ParsedRecord, git: Git, tag_match: Option<String>) -> Self {
        Self {
            record,
            tag_match,
            git,
            tag: OnceCell::new(),
        }
    }

    /// Validate a record from the commit metadata query against `schema`
    ///
    /// # Errors
    ///
    /// Returns `GitError::MalformedLog` if the record carries no sha.
    pub fn from_log(
        log: &LogRecord,
        schema: &Schema,
        git: Git,
        tag_match: Option<String>,
    ) -> Result<Self, GitError> {
        let raw: Mapping = log
            .iter()
            .map(|(label, value)| (YamlValue::from(label), YamlValue::from(value)))
            .collect();
        let record = schema.parse(&raw);

        if record.get("sha").and_then(Value::as_str).is_none() {
            return Err(GitError::MalformedLog {
                message: format!("commit record without sha: {}", record.errors()),
            });
        }
        Ok(Self::new(record, git, tag_match))
    }

    /// Full commit hash
    #[must_use]
    pub fn sha(&self) -> &str {
        self.text("sha").unwrap_or_default()
    }

    /// Author name, if git reported one
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.text("author_name")
    }

    /// Author email, if git reported one
    #[must_use]
    pub fn author_email(&self) -> Option<&str> {
        self.text("author_email")
    }

    /// A validated commit field by label
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&Value> {
        self.record.get(label)
    }

    /// The validated commit record
    #[must_use]
    pub fn record(&self) -> &ParsedRecord {
        &self.record
    }

    /// The git handle used for lazy lookups
    #[must_use]
    pub fn git(&self) -> &Git {
        &self.git
    }

    /// The glob restricting which tags count as releases
    #[must_use]
    pub fn tag_match(&self) -> Option<&str> {
        self.tag_match.as_deref()
    }

    /// The nearest tag containing this commit, resolved once and cached
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git cannot be run. Failures are not cached.
    pub fn tag(&self) -> Result<Option<Tag>, GitError> {
        if let Some(tag) = self.tag.get() {
            return Ok(tag.clone());
        }
        let tag = Tag::from_sha(&self.git, self.sha(), self.tag_match.as_deref())?;
        Ok(self.tag.get_or_init(|| tag).clone())
    }

    /// Resolve a commit attribute by name: `tag` or a built-in commit field.
    ///
    /// A known field that git left empty resolves to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DetailError::UnknownField` for any other name, or
    /// `DetailError::Git` if the tag lookup fails.
    pub fn resolve_field(&self, name: &str) -> Result<Option<Value>, DetailError> {
        if name == "tag" {
            return Ok(self.tag()?.map(Value::Tag));
        }
        if is_commit_field(name) {
            return Ok(self.record.get(name).cloned());
        }
        Err(DetailError::UnknownField {
            name: name.to_string(),
        })
    }

    fn text(&self, label: &str) -> Option<&str> {
        self.record.get(label).and_then(Value::as_str)
    }
}

impl fmt::Debug for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("sha", &self.sha())
            .field("tag_match", &self.tag_match)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record && self.tag_match == other.tag_match
    }
}
