// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Linting notes over a range

use serde::Serialize;

use crate::error::DetailError;
use crate::range::{NoteRange, NoteRangeBuilder};
use crate::schema::ValidationErrors;

/// Outcome of a lint run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintStatus {
    /// No commits in range; nothing to check
    EmptyRange,
    /// Commits in range but none of them added a note
    MissingNotes,
    /// At least one note failed validation
    InvalidNotes,
    /// Every note in range is valid
    Valid,
}

impl LintStatus {
    /// Whether the status counts as a pass
    #[must_use]
    pub fn passed(self) -> bool {
        matches!(self, Self::EmptyRange | Self::Valid)
    }
}

/// Lint outcome plus the notes it was computed from
#[derive(Debug, Clone)]
pub struct LintReport {
    status: LintStatus,
    notes: NoteRange,
}

impl LintReport {
    /// Classify a built range
    #[must_use]
    pub fn new(notes: NoteRange) -> Self {
        let status = if notes.commits().is_empty() {
            LintStatus::EmptyRange
        } else if notes.is_empty() {
            LintStatus::MissingNotes
        } else if !notes.invalid().is_empty() {
            LintStatus::InvalidNotes
        } else {
            LintStatus::Valid
        };
        Self { status, notes }
    }

    /// The lint outcome
    #[must_use]
    pub fn status(&self) -> LintStatus {
        self.status
    }

    /// Shorthand for `status().passed()`
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    /// The notes that were linted
    #[must_use]
    pub fn notes(&self) -> &NoteRange {
        &self.notes
    }

    /// `(path, errors)` for every invalid note, in range order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ValidationErrors)> {
        self.notes
            .iter()
            .filter(|note| !note.is_valid())
            .map(|note| (note.path(), note.validation_errors()))
    }

    /// A serializable summary for machine-readable output
    #[must_use]
    pub fn summary(&self) -> LintSummary<'_> {
        LintSummary {
            passed: self.passed(),
            status: self.status,
            range: self.notes.range(),
            commits: self.notes.commits().len(),
            notes: self.notes.len(),
            failures: self
                .failures()
                .map(|(path, errors)| LintFailure { path, errors })
                .collect(),
        }
    }
}

/// JSON shape of a lint run
#[derive(Debug, Serialize)]
pub struct LintSummary<'a> {
    /// Whether lint passed
    pub passed: bool,
    /// Why it passed or failed
    pub status: LintStatus,
    /// The resolved range
    pub range: &'a str,
    /// Commits in range
    pub commits: usize,
    /// Notes in range
    pub notes: usize,
    /// Invalid notes
    pub failures: Vec<LintFailure<'a>>,
}

/// One invalid note in a [`LintSummary`]
#[derive(Debug, Serialize)]
pub struct LintFailure<'a> {
    /// Note path
    pub path: &'a str,
    /// Validation errors
    pub errors: &'a ValidationErrors,
}

/// Build the range and lint it.
///
/// Passes when the range has no commits, or when it has commits, at least
/// one note, and every note is valid.
///
/// # Errors
///
/// Returns `DetailError` if the range cannot be built.
pub fn lint(builder: NoteRangeBuilder<'_>) -> Result<LintReport, DetailError> {
    builder.build().map(LintReport::new)
}
