// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! GitHub settings from the environment

use detail_git::Git;
use tracing::debug;

use crate::error::GithubError;

/// Default REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Where and as whom to talk to GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// REST API base URL, without trailing slash
    pub api_url: String,
    /// Token sent as a bearer credential, if any
    pub token: Option<String>,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch the pull request is opened from
    pub branch: String,
}

impl GithubConfig {
    /// Read settings from the process environment, falling back to git.
    ///
    /// | variable            | fallback                       |
    /// |---------------------|--------------------------------|
    /// | `GITHUB_API_URL`    | `https://api.github.com`       |
    /// | `GITHUB_TOKEN`      | unauthenticated                |
    /// | `GITHUB_REPOSITORY` | parsed from the `origin` URL   |
    /// | `GITHUB_HEAD_REF`   | the checked-out branch         |
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if the repository or branch cannot be determined.
    pub fn from_env(git: &Git) -> Result<Self, GithubError> {
        Self::from_lookup(|name| std::env::var(name).ok(), git)
    }

    /// As [`GithubConfig::from_env`], with a custom variable lookup
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if the repository or branch cannot be determined.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        git: &Git,
    ) -> Result<Self, GithubError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let (owner, repo) = match var("GITHUB_REPOSITORY") {
            Some(slug) => parse_slug(&slug).ok_or_else(|| GithubError::Configuration {
                message: format!("GITHUB_REPOSITORY must be owner/name, got \"{slug}\""),
            })?,
            None => {
                let url = git.remote_url("origin")?;
                parse_remote_url(&url).ok_or_else(|| GithubError::Configuration {
                    message: format!("cannot find a GitHub repository in remote URL \"{url}\""),
                })?
            }
        };

        let branch = match var("GITHUB_HEAD_REF") {
            Some(branch) => branch,
            None => git.current_branch()?,
        };
        if branch == "HEAD" {
            return Err(GithubError::Configuration {
                message: "HEAD is detached; set GITHUB_HEAD_REF".to_string(),
            });
        }

        let api_url = var("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        debug!(owner = %owner, repo = %repo, branch = %branch, "GitHub configuration");
        Ok(Self {
            api_url,
            token: var("GITHUB_TOKEN"),
            owner,
            repo,
            branch,
        })
    }
}

fn parse_slug(slug: &str) -> Option<(String, String)> {
    let (owner, repo) = slug.trim().split_once('/')?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Owner and name from an SSH or HTTPS remote URL
#[must_use]
pub fn parse_remote_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    let path = if let Some(rest) = url.strip_prefix("git@") {
        // git@github.com:owner/repo.git
        rest.split_once(':')?.1
    } else {
        // https://github.com/owner/repo.git, ssh://git@github.com/owner/repo
        let rest = url.split_once("://")?.1;
        rest.split_once('/')?.1
    };
    parse_slug(path.trim_end_matches('/'))
}
