//! issue_warden GitHub infrastructure adapter.
//!
//! Implements the GitHub-facing ports defined in the [`pipeline`] crate
//! ([`pipeline::IssueSource`], [`pipeline::IssueTracker`]) directly against
//! the REST API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub
//! API details (endpoints, media types, authentication, timeouts) are handled
//! here; the [`pipeline`] crate never sees them.
//!
//! Two endpoints are used:
//!
//! - `GET {issues_url}` — the full current issue list, one call per poll
//!   tick. The upstream has no incremental query; change detection lives
//!   downstream.
//! - `POST {repository_url}/issues/{number}/labels` — the single
//!   label-mutation attempt, body `{"labels": ["<label>"]}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use pipeline::{AddLabelRequest, ApplyError, FetchError, Issue, IssueSource, IssueTracker};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Media type for the issue list endpoint.
const ACCEPT_ISSUE_LIST: &str = "application/vnd.github.v3+json";

/// Media type for the label mutation endpoint.
const ACCEPT_LABELS: &str = "application/vnd.github+json";

/// Upper bound on either remote call; the poll interval is the retry
/// mechanism, so nothing here may block past it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failed to construct the adapter itself (not a per-request failure).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be built.
    #[error("failed to construct HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// A GitHub REST client carrying the API credential.
///
/// The token is held privately, attached as a bearer header on every request,
/// and never logged. One instance serves both ports; it is cheap to clone
/// (the inner [`reqwest::Client`] is reference-counted).
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    issues_url: String,
    token: String,
}

impl GitHubClient {
    /// Creates a client that polls the given issue-list URL.
    pub fn new(
        issues_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            issues_url: issues_url.into(),
            token: token.into(),
        })
    }

    /// Creates a client for one repository under the given API base
    /// (`{api_base}/repos/{owner}/{repo}/issues`).
    pub fn for_repository(
        api_base: &str,
        owner: &str,
        repo: &str,
        token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let issues_url = format!(
            "{}/repos/{}/{}/issues",
            api_base.trim_end_matches('/'),
            owner,
            repo
        );
        Self::new(issues_url, token)
    }

    /// Returns the issue-list URL this client polls.
    pub fn issues_url(&self) -> &str {
        &self.issues_url
    }
}

impl std::fmt::Debug for GitHubClient {
    // The credential is omitted from the debug representation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("issues_url", &self.issues_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn list_issues(&self) -> Result<Vec<Issue>, FetchError> {
        debug!(url = %self.issues_url, "fetching issue list");

        let response = self
            .http
            .get(&self.issues_url)
            .header(header::ACCEPT, ACCEPT_ISSUE_LIST)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let issues = response
            .json::<Vec<Issue>>()
            .await
            .map_err(|e| FetchError::Malformed {
                reason: e.to_string(),
            })?;

        debug!(count = issues.len(), "issue list fetched");
        Ok(issues)
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn add_label(&self, request: &AddLabelRequest) -> Result<(), ApplyError> {
        let url = format!("{}/issues/{}/labels", request.url, request.number);
        debug!(url = %url, label = %request.label, "posting label");

        let response = self
            .http
            .post(&url)
            .header(header::ACCEPT, ACCEPT_LABELS)
            .bearer_auth(&self.token)
            .json(&json!({ "labels": [request.label] }))
            .send()
            .await
            .map_err(|e| ApplyError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplyError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
