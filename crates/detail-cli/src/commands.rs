// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand implementations
//!
//! Each command returns its text rather than printing it, so `main` decides
//! where output goes.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use detail_core::{
    GITHUB_PR, LintStatus, NoteRangeBuilder, Prompter, PullRequestBase, Workspace, lint,
    render_changelog, to_json, write_note,
};
use tracing::{info, warn};

/// Where `detail log` sends its rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Standard output
    Stdout,
    /// A file, overwritten
    File(PathBuf),
    /// A comment on the open pull request
    PullRequestComment,
}

impl Output {
    /// Interpret the `--output` value
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("-") => Self::Stdout,
            Some(GITHUB_PR) => Self::PullRequestComment,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

/// Options for `detail log`
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Revision range
    pub range: String,
    /// Tag glob
    pub tag_match: Option<String>,
    /// Upper date bound
    pub before: Option<String>,
    /// Lower date bound
    pub after: Option<String>,
    /// Oldest first
    pub reverse: bool,
    /// JSON instead of Markdown
    pub json: bool,
    /// Fetch before reading history
    pub fetch: bool,
}

/// Result of `detail lint`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOutcome {
    /// Whether the process should exit successfully
    pub passed: bool,
    /// Text to print
    pub text: String,
}

fn range_builder<'a>(
    workspace: &'a Workspace,
    range: &str,
    fetch: bool,
    pull_requests: Option<&'a dyn PullRequestBase>,
) -> NoteRangeBuilder<'a> {
    let builder = NoteRangeBuilder::new(workspace).range(range).fetch(fetch);
    match pull_requests {
        Some(lookup) => builder.pull_requests(lookup),
        None => builder,
    }
}

/// `detail new`: create or update a note, returning its path
///
/// # Errors
///
/// Fails if the schema cannot be loaded or the note cannot be written.
pub fn new_note(
    workspace: &Workspace,
    path: Option<&Path>,
    prompter: &mut dyn Prompter,
) -> Result<PathBuf> {
    let (path, record) = write_note(workspace, path, prompter).context("Failed to write note")?;
    if !record.is_valid() {
        warn!(
            path = %path.display(),
            errors = %record.errors(),
            "Note was written with validation errors"
        );
    }
    Ok(path)
}

/// `detail lint`: check the notes of a range
///
/// # Errors
///
/// Fails if the range cannot be built. A failing lint is not an error.
pub fn lint_range(
    workspace: &Workspace,
    range: &str,
    json: bool,
    fetch: bool,
    pull_requests: Option<&dyn PullRequestBase>,
) -> Result<LintOutcome> {
    let report = lint(range_builder(workspace, range, fetch, pull_requests))
        .context("Failed to collect notes")?;
    info!(
        status = ?report.status(),
        commits = report.notes().commits().len(),
        notes = report.notes().len(),
        "Lint finished"
    );

    let text = if json {
        let mut text = serde_json::to_string_pretty(&report.summary())?;
        text.push('\n');
        text
    } else {
        let mut text = String::new();
        if report.status() == LintStatus::MissingNotes {
            text.push_str("No notes were found\n");
        }
        for (path, errors) in report.failures() {
            let _ = writeln!(text, "{path}: {errors}");
        }
        text
    };

    Ok(LintOutcome {
        passed: report.passed(),
        text,
    })
}

/// `detail log`: render the notes of a range
///
/// # Errors
///
/// Fails if the range cannot be built or rendered.
pub fn render_log(
    workspace: &Workspace,
    options: &LogOptions,
    pull_requests: Option<&dyn PullRequestBase>,
) -> Result<String> {
    let mut builder = range_builder(workspace, &options.range, options.fetch, pull_requests)
        .reverse(options.reverse);
    if let Some(pattern) = &options.tag_match {
        builder = builder.tag_match(pattern.as_str());
    }
    if let Some(date) = &options.before {
        builder = builder.before(date.as_str());
    }
    if let Some(date) = &options.after {
        builder = builder.after(date.as_str());
    }
    let notes = builder.build().context("Failed to collect notes")?;

    if options.json {
        let mut text = to_json(&notes)?;
        text.push('\n');
        Ok(text)
    } else {
        render_changelog(&notes, workspace.git()).context("Failed to render changelog")
    }
}
