#![warn(missing_docs)]
//! A Telegram bot for the ZotBins community.
//!
//! The bot watches a fixed list of GitHub repositories and posts a summary of
//! issues opened today into one channel on a daily schedule. On demand it
//! also reports the current fullness ranking of the community's waste bins,
//! read from the ZBCE telemetry API.

/// The main handler for the bot's commands.
pub mod bot_handler;
/// Local-day time window helpers.
pub mod clock;
/// The configuration for the application.
pub mod config;
/// The dispatcher for routing updates to the correct handlers.
pub mod dispatcher;
/// The daily bin fullness ranking.
pub mod fullness;
/// The client for the GitHub REST API.
pub mod github;
/// Fetching and formatting of new-issue batches.
pub mod issues;
/// The service for sending messages to the channel.
pub mod messaging;
/// The scheduled issue check.
pub mod poller;
/// The client for the ZBCE telemetry API.
pub mod zbce;

use std::{sync::Arc, time::Duration};

use teloxide::prelude::*;

use crate::{
    bot_handler::BotHandler, config::Config, fullness::FullnessReporter,
    github::DefaultGithubClient, issues::IssueFetcher, messaging::TelegramMessagingService,
    poller::IssuePoller, zbce::DefaultZbceClient,
};

/// Runs the bot.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout);

    let bot = Bot::new(config.telegram_bot_token.clone());
    let github_client = Arc::new(DefaultGithubClient::new(&config.github_api_url, timeout)?);
    let zbce_client =
        Arc::new(DefaultZbceClient::new(&config.zbce_base_url, &config.zbce_api_key, timeout)?);

    let messaging_service = Arc::new(TelegramMessagingService::new(bot.clone()));
    let issue_fetcher = Arc::new(IssueFetcher::new(github_client, config.github_owner.clone()));
    let fullness_reporter = Arc::new(FullnessReporter::new(zbce_client));

    // Confirm the connection before the scheduled checks start.
    let me = bot.get_me().await?;
    tracing::info!("Logged in as {}", me.username());

    // Spawn the scheduled issue check.
    let issue_poller = IssuePoller::new(
        issue_fetcher.clone(),
        messaging_service.clone(),
        ChatId(config.channel_id),
        config.monitored_repos.clone(),
        config.poll_interval,
    );

    tokio::spawn(async move {
        issue_poller.run().await;
    });

    let handler = Arc::new(BotHandler::new(
        messaging_service,
        issue_fetcher,
        fullness_reporter,
        config.monitored_repos,
    ));
    let mut dispatcher = dispatcher::BotDispatcher::new(handler).build(bot);
    tracing::debug!("Dispatcher built successfully.");

    dispatcher.dispatch().await;

    Ok(())
}
