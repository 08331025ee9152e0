mod commands;

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, utils::command::BotCommands};
use thiserror::Error;

use crate::{
    bot_handler::commands::{CommandContext, CommandHandler},
    fullness::FullnessReporter,
    issues::IssueFetcher,
    messaging::{MessagingError, MessagingService},
};

/// Errors that can occur while handling a command.
#[derive(Debug, Error)]
pub enum BotHandlerError {
    /// A reply could not be delivered.
    #[error("failed to send message: {0}")]
    Messaging(#[from] MessagingError),
}

/// Result alias for command handling.
pub type BotHandlerResult<T> = std::result::Result<T, BotHandlerError>;

/// The commands the bot understands.
///
/// Matching is exact and case-sensitive; `/Help` is not a command.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "kebab-case", description = "Available commands:")]
pub enum Command {
    /// `/help`
    #[command(description = "Show this help text.")]
    Help,
    /// `/hello`
    #[command(description = "Say hello.")]
    Hello,
    /// `/new-issues`, with `/new_issues` kept as a deprecated alias from the
    /// older bot variant.
    #[command(description = "Check monitored repositories for issues opened today.", aliases = ["new_issues"])]
    NewIssues,
    /// `/daily-fullness`
    #[command(description = "Show today's bin fullness ranking.")]
    DailyFullness,
}

/// Routes incoming commands to the issue fetcher and fullness reporter.
pub struct BotHandler {
    messaging_service: Arc<dyn MessagingService>,
    issue_fetcher: Arc<IssueFetcher>,
    fullness_reporter: Arc<FullnessReporter>,
    monitored_repos: Vec<String>,
}

impl BotHandler {
    /// Creates a new `BotHandler` instance.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        issue_fetcher: Arc<IssueFetcher>,
        fullness_reporter: Arc<FullnessReporter>,
        monitored_repos: Vec<String>,
    ) -> Self {
        Self { messaging_service, issue_fetcher, fullness_reporter, monitored_repos }
    }

    /// Dispatches the incoming command to the appropriate handler.
    pub async fn handle_commands(&self, msg: &Message, cmd: Command) -> BotHandlerResult<()> {
        // Never react to bot-authored messages, our own included.
        if msg.from.as_ref().is_some_and(|user| user.is_bot) {
            tracing::debug!("Ignoring bot-authored message in chat {}", msg.chat.id);
            return Ok(());
        }

        self.dispatch(cmd, msg.chat.id).await
    }

    async fn dispatch(&self, cmd: Command, chat_id: ChatId) -> BotHandlerResult<()> {
        let ctx = CommandContext { handler: self, chat_id };
        cmd.handle(ctx).await
    }
}
