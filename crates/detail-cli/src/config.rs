// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command line configuration for the `detail` binary
//!
//! Global flags select the repository and the log level; subcommands select
//! what to do with the notes in it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// detail - structured release notes stored next to your code
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "detail")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Run as if started in this directory
    ///
    /// Any directory inside the repository works; the repository root is
    /// resolved through git. Defaults to the current working directory.
    #[arg(short = 'C', long, env = "DETAIL_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every git command issued. Logs are written to stderr so that
    /// rendered output on stdout stays clean.
    #[arg(short, long, default_value = "false", global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a note, or update an existing one
    ///
    /// Prompts for every field of `.detail/schema.yaml` and writes the
    /// answers to `.detail/notes/<date>-<id>.yaml`.
    New {
        /// Existing note to update
        path: Option<PathBuf>,

        /// Accept defaults without prompting
        #[arg(long)]
        defaults: bool,
    },

    /// Check that the notes in a range are present and valid
    ///
    /// Exits with status 1 when the range has commits but no notes, or when
    /// any note fails validation.
    ///
    /// Example:
    ///   detail lint origin/main..
    Lint {
        /// Revision range; `:github/pr` uses the open pull request's base
        range: Vec<String>,

        /// Print a JSON summary instead of one line per failure
        #[arg(long)]
        json: bool,

        /// Do not `git fetch` before reading history
        #[arg(long)]
        no_fetch: bool,
    },

    /// Render the notes in a range as a changelog
    ///
    /// Example:
    ///   detail log --tag-match 'v*' -o CHANGELOG.md
    Log {
        /// Revision range; `:github/pr` uses the open pull request's base
        range: Vec<String>,

        /// Only tags matching this glob count as releases
        #[arg(long)]
        tag_match: Option<String>,

        /// Only commits before this date
        #[arg(long)]
        before: Option<String>,

        /// Only commits after this date
        #[arg(long)]
        after: Option<String>,

        /// Oldest notes first
        #[arg(long)]
        reverse: bool,

        /// Emit the notes as JSON instead of a rendered changelog
        #[arg(long)]
        json: bool,

        /// Write to this file, or `:github/pr` to comment on the pull request
        #[arg(short, long)]
        output: Option<String>,

        /// Do not `git fetch` before reading history
        #[arg(long)]
        no_fetch: bool,
    },
}

impl Config {
    /// The directory to discover the repository from
    #[must_use]
    pub fn root_path(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the root is specified but is not an existing
    /// directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.root {
            if !root.exists() {
                return Err(ConfigError::RootNotFound(root.clone()));
            }
            if !root.is_dir() {
                return Err(ConfigError::RootNotDirectory(root.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Join positional range words the way a shell user typed them
#[must_use]
pub fn join_range(words: &[String]) -> String {
    words.join(" ")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Root path not found
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),

    /// Root path is not a directory
    #[error("Root path is not a directory: {0}")]
    RootNotDirectory(PathBuf),
}
