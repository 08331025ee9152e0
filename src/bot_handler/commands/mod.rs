pub mod daily_fullness;
pub mod hello;
pub mod help;
pub mod new_issues;

use async_trait::async_trait;
use teloxide::types::ChatId;

use crate::bot_handler::{BotHandler, BotHandlerResult, Command};

/// A common trait for command handlers.
#[async_trait]
pub trait CommandHandler {
    async fn handle(&self, ctx: CommandContext<'_>) -> BotHandlerResult<()>;
}

/// CommandContext groups the data needed by all command handlers.
pub struct CommandContext<'a> {
    pub handler: &'a BotHandler,
    pub chat_id: ChatId,
}

#[async_trait]
impl CommandHandler for Command {
    async fn handle(&self, ctx: CommandContext<'_>) -> BotHandlerResult<()> {
        match self {
            Command::Help => help::handle(ctx).await,
            Command::Hello => hello::handle(ctx).await,
            Command::NewIssues => new_issues::handle(ctx).await,
            Command::DailyFullness => daily_fullness::handle(ctx).await,
        }
    }
}
