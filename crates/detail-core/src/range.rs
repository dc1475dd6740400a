// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Note aggregation over a revision range
//!
//! [`NoteRangeBuilder::build`] runs two `git log` queries over the same range:
//! one for commit metadata, one for files added under `.detail/notes`. Each
//! added file that still exists in the working tree becomes a [`Note`],
//! linked to the commit that added it.

use std::io::ErrorKind;
use std::ops::Deref;
use std::path::Path;
use std::rc::Rc;

use detail_git::{LogQuery, parse_commit_log, parse_note_log};
use indexmap::IndexMap;
use serde_yaml::Value as YamlValue;
use tracing::{debug, info, warn};

use crate::commit::Commit;
use crate::error::{DetailError, PullRequestError};
use crate::note::Note;
use crate::notes::Notes;
use crate::schema::Schema;
use crate::workspace::Workspace;

/// Range (and output) value standing for the open pull request's base branch
pub const GITHUB_PR: &str = ":github/pr";

/// Resolves the base of the pull request opened from the current branch
pub trait PullRequestBase {
    /// The base as a git revision, e.g. `origin/main`
    ///
    /// # Errors
    ///
    /// Returns `PullRequestError` if zero or several pull requests match, or
    /// the lookup itself fails.
    fn base_ref(&self) -> Result<String, PullRequestError>;
}

/// Builder for [`NoteRange`]
pub struct NoteRangeBuilder<'a> {
    workspace: &'a Workspace,
    range: String,
    tag_match: Option<String>,
    before: Option<String>,
    after: Option<String>,
    reverse: bool,
    schema: Option<Schema>,
    pull_requests: Option<&'a dyn PullRequestBase>,
    fetch: bool,
}

impl<'a> NoteRangeBuilder<'a> {
    /// Start a builder over all history
    #[must_use]
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            range: String::new(),
            tag_match: None,
            before: None,
            after: None,
            reverse: false,
            schema: None,
            pull_requests: None,
            fetch: true,
        }
    }

    /// Revision range in git syntax, or [`GITHUB_PR`]
    #[must_use]
    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Only count tags matching this glob when resolving `commit_tag`
    #[must_use]
    pub fn tag_match(mut self, pattern: impl Into<String>) -> Self {
        self.tag_match = Some(pattern.into());
        self
    }

    /// Only include commits before a date
    #[must_use]
    pub fn before(mut self, date: impl Into<String>) -> Self {
        self.before = Some(date.into());
        self
    }

    /// Only include commits after a date
    #[must_use]
    pub fn after(mut self, date: impl Into<String>) -> Self {
        self.after = Some(date.into());
        self
    }

    /// Oldest commits (and notes) first
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Validate notes against this schema instead of `.detail/schema.yaml`
    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Lookup used when the range is [`GITHUB_PR`]
    #[must_use]
    pub fn pull_requests(mut self, lookup: &'a dyn PullRequestBase) -> Self {
        self.pull_requests = Some(lookup);
        self
    }

    /// Whether to `git fetch` before querying (default: true)
    #[must_use]
    pub fn fetch(mut self, fetch: bool) -> Self {
        self.fetch = fetch;
        self
    }

    /// Query git and assemble the notes
    ///
    /// # Errors
    ///
    /// Returns `DetailError` if the note schema cannot be loaded, the pull
    /// request range cannot be resolved or contains a `--` pathspec, a git
    /// query fails, or a note file exists but cannot be read.
    pub fn build(self) -> Result<NoteRange, DetailError> {
        let Self {
            workspace,
            range,
            tag_match,
            before,
            after,
            reverse,
            schema,
            pull_requests,
            fetch,
        } = self;

        let schema = match schema {
            Some(schema) => schema,
            None => workspace.load_note_schema()?,
        };
        let schema = Rc::new(schema);
        let git = workspace.git();

        let range = if range == GITHUB_PR {
            let lookup = pull_requests.ok_or(PullRequestError::Unavailable)?;
            let base = lookup.base_ref()?;
            info!(base = %base, "Resolved pull request range");
            format!("{base}..")
        } else {
            range
        };

        let mut query = LogQuery::new(range.as_str()).reverse(reverse);
        if let Some(before) = before {
            query = query.before(before);
        }
        if let Some(after) = after {
            query = query.after(after);
        }
        query.check()?;

        if fetch {
            git.fetch()?;
        }

        let commit_schema = Schema::commit();
        let mut commits = IndexMap::new();
        for record in parse_commit_log(&git.stdout(query.commit_args())?)? {
            let commit = Commit::from_log(&record, &commit_schema, git.clone(), tag_match.clone())?;
            commits.insert(commit.sha().to_string(), Rc::new(commit));
        }

        let note_root = workspace.note_dir_relative();
        let additions = parse_note_log(&git.stdout(query.note_args(&note_root))?)?;

        let mut notes = Vec::new();
        for addition in additions {
            let commit = commits.get(&addition.sha).cloned();
            if commit.is_none() {
                warn!(sha = %addition.sha, "Note added by a commit outside the range");
            }
            for path in addition.paths {
                if let Some(note) = load_note(workspace.root(), &path, &schema, commit.clone())? {
                    notes.push(Rc::new(note));
                }
            }
        }

        let notes: Notes = notes.into_iter().collect();
        info!(
            range = %range,
            commits = commits.len(),
            notes = notes.len(),
            invalid = notes.invalid().len(),
            "Built note range"
        );

        Ok(NoteRange {
            range,
            commits,
            notes,
        })
    }
}

/// Read one note file. `Ok(None)` for a removed or empty file.
fn load_note(
    root: &Path,
    path: &str,
    schema: &Rc<Schema>,
    commit: Option<Rc<Commit>>,
) -> Result<Option<Note>, DetailError> {
    let full_path = root.join(path);
    let text = match std::fs::read_to_string(&full_path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path, "Skipping note removed since it was added");
            return Ok(None);
        }
        Err(source) => {
            return Err(DetailError::Io {
                path: full_path,
                source,
            });
        }
    };
    if text.trim().is_empty() {
        debug!(path = %path, "Skipping empty note");
        return Ok(None);
    }

    let note = match serde_yaml::from_str::<YamlValue>(&text) {
        Ok(YamlValue::Null) => None,
        Ok(YamlValue::Mapping(raw)) if raw.is_empty() => None,
        Ok(YamlValue::Mapping(raw)) => Some(Note::new(path, raw, Rc::clone(schema), commit)),
        Ok(_) => Some(Note::unparsable(
            path,
            "Note must be a mapping of fields",
            Rc::clone(schema),
            commit,
        )),
        Err(err) => {
            warn!(path = %path, error = %err, "Note is not valid YAML");
            Some(Note::unparsable(
                path,
                format!("Note is not valid YAML: {err}"),
                Rc::clone(schema),
                commit,
            ))
        }
    };
    if note.is_none() {
        debug!(path = %path, "Skipping empty note");
    }
    Ok(note)
}

/// Notes added over a revision range, plus every commit in that range
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRange {
    range: String,
    commits: IndexMap<String, Rc<Commit>>,
    notes: Notes,
}

impl NoteRange {
    /// The range queried, after resolving [`GITHUB_PR`]
    #[must_use]
    pub fn range(&self) -> &str {
        &self.range
    }

    /// Every non-merge commit in range, by sha, including those without notes
    #[must_use]
    pub fn commits(&self) -> &IndexMap<String, Rc<Commit>> {
        &self.commits
    }

    /// The notes, in `git log` order
    #[must_use]
    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    /// Give up the commit index and keep the notes
    #[must_use]
    pub fn into_notes(self) -> Notes {
        self.notes
    }
}

impl Deref for NoteRange {
    type Target = Notes;

    fn deref(&self) -> &Notes {
        &self.notes
    }
}
