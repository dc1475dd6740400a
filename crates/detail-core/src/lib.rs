// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! detail-core: structured release notes
//!
//! Notes are small YAML files committed under `.detail/notes`, validated
//! against a user-supplied schema in `.detail/schema.yaml`. This crate joins
//! those files with the commits that introduced them, associates each commit
//! with the nearest enclosing release tag, and exposes the result as a
//! filterable, groupable [`Notes`] collection for changelog rendering and
//! linting.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use detail_core::{GroupOptions, NoteRangeBuilder, Workspace};
//!
//! let workspace = Workspace::discover(".").expect("inside a git repository");
//! let notes = NoteRangeBuilder::new(&workspace)
//!     .range("origin/main..")
//!     .tag_match("v*")
//!     .build()
//!     .expect("build range");
//!
//! for (tag, group) in notes.group("commit_tag", GroupOptions::default()).expect("group") {
//!     println!("{}: {} notes", tag.map(|t| t.to_string()).unwrap_or_default(), group.len());
//! }
//! ```

pub mod authoring;
pub mod commit;
pub mod error;
pub mod lint;
pub mod note;
pub mod notes;
pub mod range;
pub mod render;
pub mod schema;
pub mod value;
pub mod workspace;

pub use authoring::{new_note_path, write_note};
pub use commit::Commit;
pub use error::{DetailError, PullRequestError, SchemaError};
pub use lint::{LintFailure, LintReport, LintStatus, LintSummary, lint};
pub use note::Note;
pub use notes::{GroupOptions, Groups, Matcher, Notes};
pub use range::{GITHUB_PR, NoteRange, NoteRangeBuilder, PullRequestBase};
pub use render::{UNRELEASED, render_changelog, to_json};
pub use schema::{
    DefaultsPrompter, Field, FieldType, ParsedRecord, Prompter, Schema, ValidationError,
    ValidationErrors,
};
pub use value::Value;
pub use workspace::Workspace;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::DetailError;
    pub use crate::note::Note;
    pub use crate::notes::{GroupOptions, Matcher, Notes};
    pub use crate::range::{NoteRange, NoteRangeBuilder};
    pub use crate::schema::Schema;
    pub use crate::value::Value;
    pub use crate::workspace::Workspace;
}
