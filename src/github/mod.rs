#[cfg(test)]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the GitHub client.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The request could not be sent or the connection failed.
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// GitHub answered with a non-success status code.
    #[error("GitHub API returned HTTP {0}")]
    Status(StatusCode),
    /// The response body did not match the expected shape.
    #[error("malformed GitHub response: {0}")]
    MalformedResponse(String),
    /// The client could not be constructed.
    #[error("failed to build GitHub HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

type Result<T> = std::result::Result<T, GithubError>;

/// A single open issue as returned by the issues endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Issue {
    /// The issue title.
    pub title: String,
    /// The API reference URL of the issue.
    pub url: String,
}

/// Client for the GitHub REST issues API.
#[automock]
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Lists open issues for `owner/repo` updated since the given cutoff.
    ///
    /// Only the first page of results is examined; repositories here are
    /// small enough that a day of new issues fits in one page.
    async fn open_issues_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Issue>>;
}

/// Default [`GithubClient`] backed by `reqwest`.
pub struct DefaultGithubClient {
    client: Client,
    api_url: String,
}

impl DefaultGithubClient {
    /// Creates a new client against the given API base URL.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("zotbins-bot"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self { client, api_url: api_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl GithubClient for DefaultGithubClient {
    async fn open_issues_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Issue>> {
        let url = format!("{}/repos/{}/{}/issues", self.api_url, owner, repo);
        tracing::debug!("Fetching open issues from {url} since {since}");

        let since = since.to_rfc3339();
        let resp = self
            .client
            .get(&url)
            .query(&[("state", "open"), ("since", since.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GithubError::Status(status));
        }

        resp.json::<Vec<Issue>>()
            .await
            .map_err(|e| GithubError::MalformedResponse(e.to_string()))
    }
}
