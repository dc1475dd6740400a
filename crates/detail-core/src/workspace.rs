// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository paths used by detail

use std::path::{Path, PathBuf};

use detail_git::Git;
use tracing::debug;

use crate::error::{DetailError, SchemaError};
use crate::schema::Schema;

/// Directory holding the schema and notes, relative to the repository root
pub const DETAIL_DIR: &str = ".detail";

/// A git repository that stores notes under `.detail/`
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    git: Git,
}

impl Workspace {
    /// Find the repository containing `dir`
    ///
    /// # Errors
    ///
    /// Returns `DetailError::Git` if `dir` is not inside a git working tree.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, DetailError> {
        let git = Git::open(dir.as_ref());
        let root = git.toplevel()?;
        debug!(root = %root.display(), "Discovered repository");
        // Re-root so later commands run from the top level
        Ok(Self::new(&root, Git::open(&root)))
    }

    /// Use an explicit root and git handle
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, git: Git) -> Self {
        Self {
            root: root.into(),
            git,
        }
    }

    /// The repository top level
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle for running git in this repository
    #[must_use]
    pub fn git(&self) -> &Git {
        &self.git
    }

    /// `<root>/.detail`
    #[must_use]
    pub fn detail_dir(&self) -> PathBuf {
        self.root.join(DETAIL_DIR)
    }

    /// `<root>/.detail/schema.yaml`
    #[must_use]
    pub fn schema_path(&self) -> PathBuf {
        self.detail_dir().join("schema.yaml")
    }

    /// `<root>/.detail/notes`
    #[must_use]
    pub fn note_dir(&self) -> PathBuf {
        self.detail_dir().join("notes")
    }

    /// The note directory relative to the root, as passed to `git log`
    #[must_use]
    pub fn note_dir_relative(&self) -> String {
        format!("{DETAIL_DIR}/notes")
    }

    /// Load the note schema from `.detail/schema.yaml`
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the schema is absent or malformed.
    pub fn load_note_schema(&self) -> Result<Schema, SchemaError> {
        Schema::load(&self.schema_path())
    }
}
