// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for detail-core

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the user-supplied note schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema file does not exist or cannot be read
    #[error(
        "Must create a schema.yaml in the \".detail\" directory of your project ({path}): {source}"
    )]
    Unreadable {
        /// Where the schema was expected
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The schema is not valid YAML
    #[error("Invalid schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The schema is not a list of field descriptors
    #[error("Schema must be a list of field descriptors")]
    NotASequence,

    /// A field descriptor has no `label`
    #[error("Entry in schema does not have label - {entry}")]
    MissingLabel {
        /// The offending entry, re-serialized
        entry: String,
    },

    /// A field descriptor is malformed
    #[error("Invalid schema entry \"{label}\": {message}")]
    InvalidField {
        /// Label of the field
        label: String,
        /// What is wrong with it
        message: String,
    },
}

/// Failures resolving the `:github/pr` range
#[derive(Debug, Error)]
pub enum PullRequestError {
    /// No open pull request was found for the branch
    #[error("No open pull request found for branch \"{branch}\"")]
    NoPullRequestFound {
        /// The head branch that was looked up
        branch: String,
    },

    /// More than one open pull request was found for the branch
    #[error("{count} open pull requests found for branch \"{branch}\"")]
    MultiplePullRequestsFound {
        /// The head branch that was looked up
        branch: String,
        /// How many pull requests matched
        count: usize,
    },

    /// The range needs a pull request lookup but none was configured
    #[error("The \":github/pr\" range requires a pull request lookup")]
    Unavailable,

    /// Configuration or API failure during the lookup
    #[error("Pull request lookup failed: {message}")]
    Lookup {
        /// Description of the failure
        message: String,
    },
}

/// Errors from aggregating, querying or writing notes
#[derive(Debug, Error)]
pub enum DetailError {
    /// A git command failed
    #[error(transparent)]
    Git(#[from] detail_git::GitError),

    /// The note schema could not be loaded
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The `:github/pr` range could not be resolved
    #[error(transparent)]
    PullRequest(#[from] PullRequestError),

    /// A note attribute that is neither a note property, a schema field, nor
    /// a `commit_` attribute
    #[error("Unknown note field: {name}")]
    UnknownField {
        /// The requested attribute name
        name: String,
    },

    /// A filter pattern is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading or writing a note file failed
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Collecting field values from the prompter failed
    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// Note data could not be serialized as YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Note data could not be serialized as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Formatting the changelog text failed
    #[error("Failed to render changelog: {0}")]
    Render(#[from] std::fmt::Error),
}
