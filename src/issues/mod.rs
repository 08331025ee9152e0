
use std::sync::Arc;

use crate::{
    clock,
    github::{GithubClient, GithubError, Issue},
};

/// The open issues of one repository collected for a single report message.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueBatch {
    /// The monitored repository the issues belong to.
    pub repo: String,
    /// Issues in API response order.
    pub issues: Vec<Issue>,
}

impl IssueBatch {
    /// Renders the batch as one message: a heading naming the repository
    /// followed by one fragment per issue.
    pub fn render(&self) -> String {
        let fragments = self
            .issues
            .iter()
            .map(|issue| format!("- {}: {}", issue.title, issue.url))
            .collect::<Vec<_>>()
            .join("\n");

        format!("📚 {} GitHub issues\n\n{}", self.repo, fragments)
    }
}

/// Fetches the issues opened today for monitored repositories.
pub struct IssueFetcher {
    github: Arc<dyn GithubClient>,
    owner: String,
}

impl IssueFetcher {
    /// Creates a new fetcher for repositories under `owner`.
    pub fn new(github: Arc<dyn GithubClient>, owner: String) -> Self {
        Self { github, owner }
    }

    /// Fetches the open issues of `repo` created since the start of the
    /// current local day.
    ///
    /// Returns `None` when no issue qualifies; that is a normal terminal
    /// state, not an error.
    pub async fn fetch_open_issues(&self, repo: &str) -> Result<Option<IssueBatch>, GithubError> {
        let since = clock::start_of_local_day();
        let issues = self.github.open_issues_since(&self.owner, repo, since).await?;

        if issues.is_empty() {
            tracing::debug!("No new issues for {}/{repo} since {since}", self.owner);
            return Ok(None);
        }

        Ok(Some(IssueBatch { repo: repo.to_string(), issues }))
    }
}
