// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git repository scaffolding for detail-core integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use detail_core::Workspace;
use tempfile::TempDir;

/// The note schema used by the integration scenarios
pub const SCHEMA: &str = r#"- label: type
  name: Type
  help: The type of change.
  type: string
  choices:
      - api-break
      - bug
      - feature
      - trivial

- label: summary
  name: Summary
  help: A high-level summary of the changes.
  type: string

- label: description
  name: Description
  help: An in-depth description of the changes.
  type: string
  condition: ["!=", "type", "trivial"]
  multiline: true
  required: false

- label: jira
  name: Jira
  help: Jira Ticket ID.
  type: string
  required: false
  condition: ["!=", "type", "trivial"]
  matches: WEB-[\d]+

- label: component
  type: string
  required: false
  condition: ["!=", "type", "trivial"]
"#;

/// A throwaway git repository with a `.detail` directory
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initialise an empty repository with the test schema
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "you@example.com"]);
        repo.git(&["config", "user.name", "Your Name"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "tag.gpgsign", "false"]);
        repo.write(".detail/schema.yaml", SCHEMA);
        repo
    }

    /// The standard scenario, oldest first:
    ///
    /// 1. `note1` (api-break)
    /// 2. `note2` (bug), tagged `v1.1`
    /// 3. `note3` (trivial), tagged `dev1.2` and `v1.2`
    /// 4. `note4` (feature)
    /// 5. `note5` (feature, invalid jira)
    /// 6. an empty commit
    pub fn scenario() -> Self {
        let repo = Self::new();
        repo.add_note(
            "note1.yaml",
            "summary: Summary1 [skip ci]\ndescription: Description1\ntype: api-break\njira: WEB-1111\n",
        );
        repo.add_note(
            "note2.yaml",
            "summary: Summary2\ndescription: Description2\ntype: bug\njira: WEB-1112\n",
        );
        repo.git(&["tag", "v1.1"]);
        repo.add_note("note3.yaml", "summary: Summary3\ntype: trivial\n");
        repo.git(&["tag", "dev1.2"]);
        repo.git(&["tag", "v1.2"]);
        repo.add_note(
            "note4.yaml",
            "summary: Summary4\ndescription: Description4\ntype: feature\njira: WEB-1113\n",
        );
        repo.add_note(
            "note5.yaml",
            "summary: Invalid5\ndescription: Hi\ntype: feature\njira: INVALID\n",
        );
        repo.git(&[
            "commit",
            "-q",
            "--allow-empty",
            "-m",
            "Invalid5\n\nType: feature\nJira: INVALID",
        ]);
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
    pub fn add_note(&self, name: &str, content: &str) -> String {
        let relative = format!(".detail/notes/{name}");
        self.write(&relative, content);
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", "commit"]);
        self.head()
    }

    /// Full sha of HEAD
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
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
