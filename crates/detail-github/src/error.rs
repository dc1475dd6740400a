// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for detail-github

use detail_core::PullRequestError;
use thiserror::Error;

/// Errors talking to GitHub
#[derive(Debug, Error)]
pub enum GithubError {
    /// Required settings are missing or malformed
    #[error("GitHub is not configured: {message}")]
    Configuration {
        /// What is missing
        message: String,
    },

    /// The HTTP request failed
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with an error status
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// No open pull request for the branch
    #[error("No open pull request found for branch \"{branch}\"")]
    NoPullRequestFound {
        /// Head branch looked up
        branch: String,
    },

    /// Several open pull requests for the branch
    #[error("{count} open pull requests found for branch \"{branch}\"")]
    MultiplePullRequestsFound {
        /// Head branch looked up
        branch: String,
        /// How many matched
        count: usize,
    },

    /// Reading the repository or branch from git failed
    #[error(transparent)]
    Git(#[from] detail_git::GitError),
}

impl From<GithubError> for PullRequestError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::NoPullRequestFound { branch } => Self::NoPullRequestFound { branch },
            GithubError::MultiplePullRequestsFound { branch, count } => {
                Self::MultiplePullRequestsFound { branch, count }
            }
            other => Self::Lookup {
                message: other.to_string(),
            },
        }
    }
}
