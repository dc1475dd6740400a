// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Pull request lookups over the GitHub REST API

use detail_core::{PullRequestBase, PullRequestError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GithubConfig;
use crate::error::GithubError;

/// Remote the base branch is resolved against
pub const BASE_REMOTE: &str = "origin";

/// The fields of a pull request detail needs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
    /// Target branch
    pub base: BaseRef,
}

/// The branch a pull request merges into
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaseRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub name: String,
}

/// Blocking GitHub client for one repository and branch
#[derive(Debug, Clone)]
pub struct GithubClient {
    config: GithubConfig,
    http: Client,
}

impl GithubClient {
    /// Build a client
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Http` if the HTTP client cannot be built.
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        let http = Client::builder()
            .user_agent(concat!("detail/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// The settings in use
    #[must_use]
    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    /// The single open pull request whose head is the configured branch
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if the request fails, or if zero or several
    /// pull requests match.
    pub fn pull_request(&self) -> Result<PullRequest, GithubError> {
        let GithubConfig {
            owner, repo, branch, ..
        } = &self.config;
        let url = self.url(&format!("/repos/{owner}/{repo}/pulls"));
        let head = format!("{owner}:{branch}");
        debug!(url = %url, head = %head, "Listing pull requests");

        let response = self
            .authorized(self.http.get(&url))
            .query(&[("head", head.as_str()), ("state", "open")])
            .send()?;
        let pulls: Vec<PullRequest> = ensure_ok(response)?.json()?;
        select_pull_request(pulls, branch)
    }

    /// Post `body` as a comment on the open pull request
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if the pull request cannot be found or the
    /// comment is rejected.
    pub fn comment(&self, body: &str) -> Result<PullRequest, GithubError> {
        let pull = self.pull_request()?;
        let GithubConfig { owner, repo, .. } = &self.config;
        let url = self.url(&format!(
            "/repos/{owner}/{repo}/issues/{}/comments",
            pull.number
        ));

        let response = self
            .authorized(self.http.post(&url))
            .json(&serde_json::json!({ "body": body }))
            .send()?;
        ensure_ok(response)?;
        info!(number = pull.number, url = %pull.html_url, "Commented on pull request");
        Ok(pull)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/vnd.github+json");
        match &self.config.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

impl PullRequestBase for GithubClient {
    fn base_ref(&self) -> Result<String, PullRequestError> {
        let pull = self.pull_request()?;
        Ok(format!("{BASE_REMOTE}/{}", pull.base.name))
    }
}

fn ensure_ok(response: Response) -> Result<Response, GithubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    Err(GithubError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Exactly one pull request, or the matching error
fn select_pull_request(
    mut pulls: Vec<PullRequest>,
    branch: &str,
) -> Result<PullRequest, GithubError> {
    match pulls.len() {
        0 => Err(GithubError::NoPullRequestFound {
            branch: branch.to_string(),
        }),
        1 => Ok(pulls.remove(0)),
        count => Err(GithubError::MultiplePullRequestsFound {
            branch: branch.to_string(),
            count,
        }),
    }
}
