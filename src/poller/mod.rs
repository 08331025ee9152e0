
use std::{sync::Arc, time::Duration};

use teloxide::prelude::*;
use thiserror::Error;

use crate::{
    issues::IssueFetcher,
    messaging::{MessagingError, MessagingService},
};

/// Errors that can occur during a scheduled issue check.
#[derive(Debug, Error)]
pub enum PollerError {
    /// Posting to the channel failed.
    #[error("failed to post to channel: {0}")]
    Messaging(#[from] MessagingError),
}

type Result<T> = std::result::Result<T, PollerError>;

/// Periodically checks the monitored repositories for new issues and posts
/// the results to one designated channel.
pub struct IssuePoller {
    issue_fetcher: Arc<IssueFetcher>,
    messaging_service: Arc<dyn MessagingService>,
    /// The channel scheduled reports are posted to.
    channel: ChatId,
    /// Monitored repositories in posting order.
    monitored_repos: Vec<String>,
    /// Seconds between ticks.
    poll_interval: u64,
}

impl IssuePoller {
    /// Creates a new `IssuePoller`.
    pub fn new(
        issue_fetcher: Arc<IssueFetcher>,
        messaging_service: Arc<dyn MessagingService>,
        channel: ChatId,
        monitored_repos: Vec<String>,
        poll_interval: u64,
    ) -> Self {
        Self { issue_fetcher, messaging_service, channel, monitored_repos, poll_interval }
    }

    /// Runs the poller. The first tick fires immediately, then every
    /// `poll_interval` seconds.
    pub async fn run(&self) {
        tracing::debug!("Starting issue poller with interval {}s", self.poll_interval);

        let mut interval = tokio::time::interval(Duration::from_secs(self.poll_interval));

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// One scheduled pass over the monitored repositories, in order.
    ///
    /// Failures are isolated per repository so one bad fetch or send never
    /// stops the rest of the pass.
    pub async fn tick(&self) {
        for repo in &self.monitored_repos {
            if let Err(e) = self.check_repo(repo).await {
                tracing::error!("Failed to post issue report for {repo}: {e}");
            }
        }
    }

    async fn check_repo(&self, repo: &str) -> Result<()> {
        match self.issue_fetcher.fetch_open_issues(repo).await {
            Ok(Some(batch)) => {
                tracing::debug!("Posting {} new issues for {repo}", batch.issues.len());
                self.messaging_service.send_issues_msg(self.channel, &batch).await?;
                self.messaging_service.send_separator_msg(self.channel).await?;
            }
            // The scheduled path stays silent for repos without new issues.
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Issue fetch failed for {repo}: {e}");
            }
        }
        Ok(())
    }
}
