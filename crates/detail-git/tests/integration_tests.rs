// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for detail-git
//!
//! These tests run the real `git` binary against throwaway repositories.

use std::fs;
use std::path::Path;

use detail_git::{Git, GitError, LogQuery, Tag, parse_commit_log, parse_note_log};
use similar_asserts::assert_eq;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    Git::open(dir)
        .stdout(args.iter().copied())
        .unwrap_or_else(|e| panic!("git {} failed: {e}", args.join(" ")))
}

fn commit_file(dir: &Path, relative: &str, content: &str) -> String {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(&path, content).expect("Failed to write file");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", relative]);
    git(dir, &["rev-parse", "HEAD"])
}

fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "you@example.com"]);
    git(dir.path(), &["config", "user.name", "Your Name"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    git(dir.path(), &["config", "tag.gpgsign", "false"]);
    dir
}

#[test]
fn test_commit_and_note_queries() {
    let dir = init_repo();
    let first = commit_file(dir.path(), "README", "hello\n");
    let second = commit_file(dir.path(), ".detail/notes/a.yaml", "summary: A\n");
    let repo = Git::open(dir.path());

    let query = LogQuery::new("");
    let commits = parse_commit_log(&repo.stdout(query.commit_args()).expect("log"))
        .expect("parse");
    let shas: Vec<_> = commits.iter().filter_map(|c| c.get("sha")).collect();
    assert_eq!(shas, vec![second.as_str(), first.as_str()]);
    assert_eq!(commits[0].get("author_name"), Some("Your Name"));
    assert_eq!(commits[0].get("author_email"), Some("you@example.com"));

    let notes = parse_note_log(&repo.stdout(query.note_args(".detail/notes")).expect("log"))
        .expect("parse");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].sha, second);
    assert_eq!(notes[0].paths, vec![".detail/notes/a.yaml".to_string()]);

    let reversed = parse_commit_log(
        &repo
            .stdout(LogQuery::new("").reverse(true).commit_args())
            .expect("log"),
    )
    .expect("parse");
    assert_eq!(reversed[0].get("sha"), Some(first.as_str()));
}

#[test]
fn test_note_query_keeps_unusual_paths() {
    let dir = init_repo();
    let sha = commit_file(dir.path(), ".detail/notes/naïve.yaml", "summary: A\n");
    let repo = Git::open(dir.path());

    let notes = parse_note_log(
        &repo
            .stdout(LogQuery::new("").note_args(".detail/notes"))
            .expect("log"),
    )
    .expect("parse");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].sha, sha);
    assert_eq!(notes[0].paths, vec![".detail/notes/naïve.yaml".to_string()]);
}

#[test]
fn test_tag_containing_commit() {
    let dir = init_repo();
    let first = commit_file(dir.path(), "a", "a\n");
    git(dir.path(), &["tag", "v1.0"]);
    commit_file(dir.path(), "b", "b\n");
    let last = commit_file(dir.path(), "c", "c\n");
    git(dir.path(), &["tag", "v2.0"]);
    let untagged = commit_file(dir.path(), "d", "d\n");
    let repo = Git::open(dir.path());

    let tag = Tag::from_sha(&repo, &first, None).expect("describe");
    assert_eq!(tag, Some(Tag::new("v1.0")));
    assert!(
        tag.expect("tag")
            .date(&repo)
            .expect("date")
            .is_some()
    );

    assert_eq!(
        Tag::from_sha(&repo, &last, Some("v*")).expect("describe"),
        Some(Tag::new("v2.0"))
    );
    assert_eq!(Tag::from_sha(&repo, &untagged, None).expect("describe"), None);
}

#[test]
fn test_toplevel_and_branch() {
    let dir = init_repo();
    commit_file(dir.path(), "a", "a\n");
    git(dir.path(), &["checkout", "-q", "-b", "feature/notes"]);
    let nested = dir.path().join("nested");
    fs::create_dir_all(&nested).expect("mkdir");

    let repo = Git::open(&nested);
    let toplevel = repo.toplevel().expect("toplevel");
    assert_eq!(
        toplevel.canonicalize().expect("canonicalize"),
        dir.path().canonicalize().expect("canonicalize")
    );
    assert_eq!(repo.current_branch().expect("branch"), "feature/notes");
    assert!(matches!(
        repo.remote_url("origin"),
        Err(GitError::CommandFailed { .. })
    ));
}

#[test]
fn test_outside_repository() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = Git::open(dir.path()).toplevel();
    assert!(matches!(result, Err(GitError::CommandFailed { .. })));
}
