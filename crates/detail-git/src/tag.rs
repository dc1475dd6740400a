// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Release tags

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::date::parse_date;
use crate::error::GitError;
use crate::shell::Git;

/// A git tag.
///
/// Tags compare, hash and order by name only; the lazily resolved date is
/// never part of a tag's identity.
#[derive(Clone)]
pub struct Tag {
    name: String,
    date: OnceCell<Option<DateTime<FixedOffset>>>,
}

impl Tag {
    /// Create a tag from its name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: OnceCell::new(),
        }
    }

    /// Find the nearest tag that contains a commit.
    ///
    /// Runs `git describe <sha> --contains [--match=<glob>]`. The describe
    /// output may carry a distance suffix (`v1.0~3`, `v1.0^2~1`); everything
    /// from the first `~` or `^` on is dropped. Returns `None` when no tag
    /// contains the commit, which git reports as a failed describe.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if git cannot be run.
    pub fn from_sha(git: &Git, sha: &str, tag_match: Option<&str>) -> Result<Option<Self>, GitError> {
        let mut args = vec!["describe".to_string(), sha.to_string(), "--contains".to_string()];
        if let Some(pattern) = tag_match {
            args.push(format!("--match={pattern}"));
        }

        let output = git.run(args, false)?;
        let tag = parse_describe(&output.stdout).map(Self::new);
        debug!(sha = %sha, tag = ?tag.as_ref().map(Tag::name), "Resolved tag");
        Ok(tag)
    }

    /// The tag name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The author date of the commit the tag points at.
    ///
    /// Resolved with a single `git log` query the first time it is asked for;
    /// the result (including `None` for unparsable output) is cached.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the log query fails. Failures are not cached.
    pub fn date(&self, git: &Git) -> Result<Option<DateTime<FixedOffset>>, GitError> {
        if let Some(date) = self.date.get() {
            return Ok(*date);
        }

        let stdout = git.stdout([
            "log",
            "-1",
            "--format=%ad",
            "--date=iso-strict",
            self.name.as_str(),
            "--",
        ])?;
        let date = parse_date(&stdout);
        Ok(*self.date.get_or_init(|| date))
    }
}

/// Extract a tag name from `git describe --contains` output
fn parse_describe(output: &str) -> Option<&str> {
    let name = output
        .trim()
        .split(['~', '^', ':'])
        .next()
        .unwrap_or_default();
    (!name.is_empty()).then_some(name)
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tag").field(&self.name).finish()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandOutput, Runner};
    use proptest::prelude::*;
    use similar_asserts::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct Recorder {
        stdout: String,
        status: i32,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn replying(stdout: &str, status: i32) -> Self {
            Self {
                stdout: stdout.to_string(),
                status,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Runner for Recorder {
        fn execute(&self, args: &[String]) -> Result<CommandOutput, GitError> {
            self.calls.lock().unwrap().push(args.join(" "));
            Ok(CommandOutput {
                status: self.status,
                stdout: self.stdout.clone(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn test_from_sha_strips_distance() {
        let recorder = Recorder::replying("0.1~8", 0);
        let git = Git::new(recorder.clone());

        let tag = Tag::from_sha(&git, "sha1", None).expect("describe");
        assert_eq!(tag.map(|t| t.name().to_string()), Some("0.1".to_string()));
        assert_eq!(recorder.calls(), vec!["describe sha1 --contains"]);
    }

    #[test]
    fn test_from_sha_with_match_and_no_tag() {
        let recorder = Recorder::replying("", 128);
        let git = Git::new(recorder.clone());

        let tag = Tag::from_sha(&git, "sha1", Some("pattern")).expect("describe");
        assert!(tag.is_none());
        assert_eq!(
            recorder.calls(),
            vec!["describe sha1 --contains --match=pattern"]
        );
    }

    #[test]
    fn test_parse_describe_variants() {
        assert_eq!(parse_describe("v1.1"), Some("v1.1"));
        assert_eq!(parse_describe("v1.1~2"), Some("v1.1"));
        assert_eq!(parse_describe("v1.1^0"), Some("v1.1"));
        assert_eq!(parse_describe("v1.1~2^2~1"), Some("v1.1"));
        assert_eq!(parse_describe("  dev1.2\n"), Some("dev1.2"));
        assert_eq!(parse_describe(""), None);
        assert_eq!(parse_describe("~3"), None);
    }

    #[test]
    fn test_date_unparsable_is_cached_none() {
        let recorder = Recorder::replying("", 0);
        let git = Git::new(recorder.clone());
        let tag = Tag::new("2.1");

        assert_eq!(tag.date(&git).expect("date"), None);
        assert_eq!(tag.date(&git).expect("date"), None);
        assert_eq!(
            recorder.calls(),
            vec!["log -1 --format=%ad --date=iso-strict 2.1 --"]
        );
    }

    #[test]
    fn test_date_parsed_and_cached() {
        let recorder = Recorder::replying("2026-01-17T02:33:06+00:00", 0);
        let git = Git::new(recorder.clone());
        let tag = Tag::new("v1.0");

        let first = tag.date(&git).expect("date").expect("some date");
        let second = tag.date(&git).expect("date").expect("some date");
        assert_eq!(first, second);
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_date_failure_is_not_cached() {
        let recorder = Recorder::replying("", 128);
        let git = Git::new(recorder.clone());
        let tag = Tag::new("missing");

        assert!(tag.date(&git).is_err());
        assert!(tag.date(&git).is_err());
        assert_eq!(recorder.calls().len(), 2);
    }

    #[test]
    fn test_equality_ignores_cached_date() {
        let recorder = Recorder::replying("2026-01-17T02:33:06+00:00", 0);
        let git = Git::new(recorder);
        let resolved = Tag::new("v1.0");
        resolved.date(&git).expect("date");

        assert_eq!(resolved, Tag::new("v1.0"));
        assert!(Tag::new("dev1.2") < Tag::new("v1.1"));
        assert_eq!(Tag::new("v1.0").to_string(), "v1.0");
    }

    proptest! {
        #[test]
        fn prop_describe_suffixes_are_stripped(
            name in "[A-Za-z0-9._/-]{1,20}",
            suffix in prop_oneof![
                Just(String::new()),
                (1u32..50).prop_map(|n| format!("~{n}")),
                (1u32..3).prop_map(|n| format!("^{n}")),
                "[a-z/._]{1,12}".prop_map(|path| format!(":{path}")),
            ],
        ) {
            let output = format!("{name}{suffix}\n");
            prop_assert_eq!(parse_describe(&output), Some(name.as_str()));
        }

        #[test]
        fn prop_describe_is_a_clean_prefix(output in "\\PC{0,40}") {
            if let Some(name) = parse_describe(&output) {
                prop_assert!(!name.is_empty());
                prop_assert!(!name.contains(['~', '^', ':']));
                prop_assert!(output.trim().starts_with(name));
            }
        }
    }
}
