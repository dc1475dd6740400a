// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! detail-git: Git plumbing for detail
//!
//! This library crate wraps the `git` binary: running commands, resolving the
//! tag that contains a commit, and parsing the structured `git log` output
//! used to join commits with the note files they introduced.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use detail_git::{Git, LogQuery, parse_commit_log};
//!
//! let git = Git::open(".");
//! let query = LogQuery::new("origin/main..").reverse(true);
//! let stdout = git.stdout(query.commit_args()).expect("git log");
//!
//! for record in parse_commit_log(&stdout).expect("parse log") {
//!     println!("{:?}", record.get("sha"));
//! }
//! ```

pub mod date;
pub mod error;
pub mod log;
pub mod shell;
pub mod tag;

pub use date::parse_date;
pub use error::GitError;
pub use log::{LogQuery, LogRecord, NoteAddition, parse_commit_log, parse_note_log};
pub use shell::{CommandOutput, Git, Runner, ShellRunner};
pub use tag::Tag;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::GitError;
    pub use crate::log::{LogQuery, LogRecord, NoteAddition};
    pub use crate::shell::{Git, Runner, ShellRunner};
    pub use crate::tag::Tag;
}
