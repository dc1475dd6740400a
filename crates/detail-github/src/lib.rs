// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! detail-github: GitHub integration for detail
//!
//! Resolves the `:github/pr` range to the base branch of the pull request
//! opened from the current branch, and posts rendered changelogs as pull
//! request comments.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{BaseRef, GithubClient, PullRequest};
pub use config::{GithubConfig, parse_remote_url};
pub use error::GithubError;

/// Build a client from the environment of the repository behind `git`
///
/// # Errors
///
/// Returns `GithubError` if the configuration is incomplete or the HTTP
/// client cannot be built.
pub fn from_env(git: &detail_git::Git) -> Result<GithubClient, GithubError> {
    GithubClient::new(GithubConfig::from_env(git)?)
}
