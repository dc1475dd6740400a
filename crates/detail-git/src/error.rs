// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for detail-git

use thiserror::Error;

/// Errors that can occur while running or parsing git commands
#[derive(Debug, Error)]
pub enum GitError {
    /// A command exited with a non-zero status
    #[error("Command failed with status {status}: {command}\n{stderr}")]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Exit status reported by the process (-1 if killed by a signal)
        status: i32,
        /// Captured and trimmed stderr
        stderr: String,
    },

    /// The command could not be started at all
    #[error("Failed to run {command}: {source}")]
    Spawn {
        /// The command line that was attempted
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// `git log` output did not have the expected record structure
    #[error("Malformed git log output: {message}")]
    MalformedLog {
        /// Description of what was wrong
        message: String,
    },

    /// A revision range that cannot be handed to `git log`
    #[error("Invalid revision range {range:?}: {message}")]
    InvalidRange {
        /// The range as given
        range: String,
        /// Why it was rejected
        message: String,
    },
}
