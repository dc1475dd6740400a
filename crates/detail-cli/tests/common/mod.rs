// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git repository scaffolding for detail-cli integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use detail_core::Workspace;
use tempfile::TempDir;

/// A small note schema
pub const SCHEMA: &str = r#"- label: type
  name: Type
  choices: [bug, feature, trivial]

- label: summary
  name: Summary

- label: description
  name: Description
  multiline: true
  required: false
  condition: ["!=", "type", "trivial"]

- label: jira
  required: false
  matches: WEB-[\d]+
"#;

/// A throwaway git repository with a `.detail` directory
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initialise a repository with the schema and one unrelated commit
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "you@example.com"]);
        repo.git(&["config", "user.name", "Your Name"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "tag.gpgsign", "false"]);
        repo.write(".detail/schema.yaml", SCHEMA);
        repo.git(&["add", "."]);
        repo.git(&["commit", "-q", "-m", "Add schema"]);
        repo
    }

    /// The repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A workspace rooted at this repository
    pub fn workspace(&self) -> Workspace {
        Workspace::discover(self.path()).expect("Failed to discover workspace")
    }

    /// Write a file relative to the root
    pub fn write(&self, relative_path: &str, content: &str) {
        let path = self.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// Write a note under `.detail/notes` and commit it
    pub fn add_note(&self, name: &str, content: &str) {
        self.write(&format!(".detail/notes/{name}"), content);
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", name]);
    }

    /// Run git in the repository, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(args)
            .output()
            .expect("Failed to run git command");

        if !output.status.success() {
            panic!(
                "Git command failed: git {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
