// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Changelog rendering and JSON export

use std::fmt::{self, Write};

use detail_git::{Git, Tag};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::DetailError;
use crate::note::Note;
use crate::notes::{GroupOptions, Notes};
use crate::schema::ValidationErrors;
use crate::value::Value;

/// Heading used for notes whose commit is not contained in any tag
pub const UNRELEASED: &str = "Unreleased";

/// Render notes as a Markdown changelog.
///
/// Notes are grouped by `commit_tag` in first-seen order. Each group gets a
/// `## <tag> (<date>)` heading, each note a bullet with its author and short
/// sha followed by its validated fields.
///
/// # Errors
///
/// Returns `DetailError::Git` if a tag or tag date lookup fails.
pub fn render_changelog(notes: &Notes, git: &Git) -> Result<String, DetailError> {
    let mut out = String::new();

    for (key, group) in notes.group("commit_tag", GroupOptions::default())? {
        let tag = key.as_ref().and_then(Value::as_tag);
        let heading = tag.map_or(UNRELEASED, Tag::name);
        match tag.map(|tag| tag.date(git)).transpose()?.flatten() {
            Some(date) => writeln!(out, "## {heading} ({})", date.date_naive())?,
            None => writeln!(out, "## {heading}")?,
        }

        for note in &group {
            out.push('\n');
            render_note(&mut out, note)?;
        }
        out.push('\n');
    }

    Ok(out)
}

fn render_note(out: &mut impl Write, note: &Note) -> fmt::Result {
    let author = note
        .commit()
        .and_then(|commit| commit.author_name())
        .unwrap_or_default();
    let sha = note.commit().map(|commit| commit.sha()).unwrap_or_default();
    let short = sha.get(..7).unwrap_or(sha);
    writeln!(out, "- {author} [{short}]")?;
    out.write_char('\n')?;

    for (label, value) in note.schema_data().iter() {
        let text = value.to_string();
        writeln!(out, "  *{label}*: {}", indent(text.trim_end(), 4))?;
    }
    Ok(())
}

/// Indent every line after the first by `width` spaces
fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&pad);
        }
        out.push_str(line);
    }
    out
}

/// One note as exported to JSON
#[derive(Debug, Serialize)]
struct NoteExport<'a> {
    path: &'a str,
    is_valid: bool,
    errors: &'a ValidationErrors,
    fields: &'a IndexMap<String, Value>,
    commit: Option<CommitExport<'a>>,
}

#[derive(Debug, Serialize)]
struct CommitExport<'a> {
    #[serde(flatten)]
    fields: &'a IndexMap<String, Value>,
    tag: Option<Tag>,
}

/// Export notes as a pretty-printed JSON array, for external templating
///
/// # Errors
///
/// Returns `DetailError` if a tag lookup or serialization fails.
pub fn to_json(notes: &Notes) -> Result<String, DetailError> {
    let exports = notes
        .iter()
        .map(|note| {
            let commit = note
                .commit()
                .map(|commit| {
                    commit.tag().map(|tag| CommitExport {
                        fields: commit.record().data(),
                        tag,
                    })
                })
                .transpose()?;
            Ok(NoteExport {
                path: note.path(),
                is_valid: note.is_valid(),
                errors: note.validation_errors(),
                fields: note.schema_data().data(),
                commit,
            })
        })
        .collect::<Result<Vec<_>, DetailError>>()?;

    Ok(serde_json::to_string_pretty(&exports)?)
}
