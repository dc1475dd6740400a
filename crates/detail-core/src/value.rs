// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Field values
//!
//! Everything a note attribute can resolve to: validated schema values,
//! commit metadata, note properties and release tags.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use detail_git::Tag;
use serde::Serialize;

/// A resolved attribute value.
///
/// The derived ordering sorts by variant first, then by value, so mixed-type
/// group keys still have a total order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean field or property such as `is_valid`
    Bool(bool),
    /// An integer field
    Integer(i64),
    /// A string field
    Text(String),
    /// A datetime field or commit date
    DateTime(DateTime<FixedOffset>),
    /// A release tag (`commit_tag`)
    Tag(Tag),
}

impl Value {
    /// The string content, for text values only
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The tag, for tag values only
    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Equality as used by collection filters: a tag equals text holding its
    /// name, everything else compares exactly.
    #[must_use]
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Tag(tag), Self::Text(text)) | (Self::Text(text), Self::Tag(tag)) => {
                tag.name() == text
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::DateTime(value) => f.write_str(&value.to_rfc3339()),
            Self::Tag(tag) => f.write_str(tag.name()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Tag> for Value {
    fn from(value: Tag) -> Self {
        Self::Tag(value)
    }
}
