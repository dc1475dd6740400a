// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Structured `git log` queries
//!
//! Two queries are issued over the same range: one that prints the metadata
//! of every commit, and one that lists the files each commit added under the
//! note storage directory. Both print records separated by [`DELIMITER`].

use tracing::debug;

use crate::error::GitError;

/// Separator printed before or after each log record
pub const DELIMITER: &str = "<-------->";

/// Fields printed for every commit, as `label: placeholder` pairs
const COMMIT_FIELDS: &[(&str, &str)] = &[
    ("sha", "%H"),
    ("author_name", "%an"),
    ("author_email", "%ae"),
    ("author_date", "%ad"),
    ("committer_name", "%cn"),
    ("committer_email", "%ce"),
    ("committer_date", "%cd"),
];

/// Parameters shared by both log queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Revision range in git syntax (empty for all history)
    pub range: String,
    /// Only include commits before this date (passed to `--before`)
    pub before: Option<String>,
    /// Only include commits after this date (passed to `--after`)
    pub after: Option<String>,
    /// Oldest commits first
    pub reverse: bool,
}

impl LogQuery {
    /// Create a query over a revision range
    #[must_use]
    pub fn new(range: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            ..Default::default()
        }
    }

    /// Filter commits before a date
    #[must_use]
    pub fn before(mut self, date: impl Into<String>) -> Self {
        self.before = Some(date.into());
        self
    }

    /// Filter commits after a date
    #[must_use]
    pub fn after(mut self, date: impl Into<String>) -> Self {
        self.after = Some(date.into());
        self
    }

    /// Set reverse ordering
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Reject ranges that cannot be passed to `git log` as revisions.
    ///
    /// A `--` would turn every flag after the range into a pathspec.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidRange` if the range contains `--`.
    pub fn check(&self) -> Result<(), GitError> {
        if self.range.split_whitespace().any(|word| word == "--") {
            return Err(GitError::InvalidRange {
                range: self.range.clone(),
                message: "pathspecs (`--`) are not supported in a note range".to_string(),
            });
        }
        Ok(())
    }

    /// Arguments common to both queries: range, merge and date filters, order
    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "--no-pager".to_string(),
            "-c".to_string(),
            "core.quotePath=false".to_string(),
            "log".to_string(),
        ];
        args.extend(self.range.split_whitespace().map(str::to_string));
        args.push("--no-merges".to_string());
        if let Some(before) = &self.before {
            args.push(format!("--before={before}"));
        }
        if let Some(after) = &self.after {
            args.push(format!("--after={after}"));
        }
        if self.reverse {
            args.push("--reverse".to_string());
        }
        args
    }

    /// Arguments for the commit metadata query
    #[must_use]
    pub fn commit_args(&self) -> Vec<String> {
        let fields: String = COMMIT_FIELDS
            .iter()
            .map(|(label, placeholder)| format!("{label}: {placeholder}%n"))
            .collect();

        let mut args = self.base_args();
        args.push(format!("--format={fields}{DELIMITER}"));
        args.push("--date=iso-strict".to_string());
        args
    }

    /// Arguments for the query listing files added under `note_root`.
    ///
    /// `note_root` is a path relative to the repository top level.
    #[must_use]
    pub fn note_args(&self, note_root: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.push(format!("--format={DELIMITER}sha: %H"));
        args.push("--diff-filter=A".to_string());
        args.push("--raw".to_string());
        args.push("--".to_string());
        args.push(note_root.to_string());
        args
    }
}

/// One commit's fields from the metadata query, in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    fields: Vec<(String, String)>,
}

impl LogRecord {
    /// Look up a field by label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Files added under the note root by one commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteAddition {
    /// Full SHA of the commit
    pub sha: String,
    /// Paths relative to the repository top level
    pub paths: Vec<String>,
}

/// Parse the output of [`LogQuery::commit_args`]
///
/// # Errors
///
/// Returns `GitError::MalformedLog` if a line is not a `label: value` pair.
pub fn parse_commit_log(stdout: &str) -> Result<Vec<LogRecord>, GitError> {
    let mut records = Vec::new();

    for chunk in stdout.split(DELIMITER) {
        if chunk.trim().is_empty() {
            continue;
        }

        let mut fields = Vec::new();
        for line in chunk.lines().filter(|line| !line.trim().is_empty()) {
            let (label, value) = line.split_once(':').ok_or_else(|| GitError::MalformedLog {
                message: format!("expected `label: value`, got {line:?}"),
            })?;
            fields.push((label.trim().to_string(), value.trim().to_string()));
        }
        records.push(LogRecord { fields });
    }

    debug!(count = records.len(), "Parsed commit log");
    Ok(records)
}

/// Parse the output of [`LogQuery::note_args`]
///
/// # Errors
///
/// Returns `GitError::MalformedLog` if a record does not start with a sha line.
pub fn parse_note_log(stdout: &str) -> Result<Vec<NoteAddition>, GitError> {
    let mut additions = Vec::new();

    for chunk in stdout.split(DELIMITER) {
        if chunk.trim().is_empty() {
            continue;
        }

        let mut lines = chunk.lines();
        let header = lines.next().unwrap_or_default();
        let sha = header
            .trim()
            .strip_prefix("sha:")
            .map(str::trim)
            .filter(|sha| !sha.is_empty())
            .ok_or_else(|| GitError::MalformedLog {
                message: format!("expected `sha: <sha>`, got {header:?}"),
            })?;

        // --raw lines look like ":000000 100644 0000000 1a2b3c4 A\t<path>"
        let paths = lines
            .filter_map(|line| line.split_once('\t'))
            .map(|(_, path)| unquote_path(path.trim()))
            .filter(|path| !path.is_empty())
            .collect();

        additions.push(NoteAddition {
            sha: sha.to_string(),
            paths,
        });
    }

    debug!(count = additions.len(), "Parsed note log");
    Ok(additions)
}

/// Undo git's C-style quoting of unusual paths (`"caf\303\251.yaml"`).
///
/// Unquoted paths are returned unchanged. Octal escapes are collected as raw
/// bytes and decoded as UTF-8 together.
fn unquote_path(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('t') => bytes.push(b'\t'),
            Some('r') => bytes.push(b'\r'),
            Some('a') => bytes.push(0x07),
            Some('b') => bytes.push(0x08),
            Some('f') => bytes.push(0x0c),
            Some('v') => bytes.push(0x0b),
            Some(digit @ '0'..='7') => {
                let mut value = digit.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|next| next.to_digit(8)) {
                        Some(next) => {
                            value = value * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push(u8::try_from(value).unwrap_or(u8::MAX));
            }
            Some(other) => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
