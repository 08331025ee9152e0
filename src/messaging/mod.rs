use async_trait::async_trait;
use mockall::automock;
use teloxide::{prelude::*, types::ParseMode, utils::html};
use thiserror::Error;

use crate::{fullness::FullnessTable, issues::IssueBatch};

/// Sent after every issue batch. The message body is a braille blank: it
/// renders as an empty line and keeps consecutive batches visually apart.
const SEPARATOR: &str = "\u{2800}";

const HELP_TEXT: &str = "🤖 ZotBins bot commands:\n\n\
    /help — show this help text\n\
    /hello — say hello\n\
    /new-issues — check monitored repositories for issues opened today\n\
    /daily-fullness — show today's bin fullness ranking";

const GREETING_TEXT: &str = "👋 Hello!";

const FULLNESS_UNAVAILABLE_TEXT: &str =
    "😞 No bin fullness data available right now. Try again later.";

/// Errors that can occur while sending messages.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The underlying Telegram request failed.
    #[error("Telegram API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, MessagingError>;

/// Trait for sending messages to a chat.
#[automock]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Sends the static help text.
    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the static greeting.
    async fn send_greeting_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends a rendered issue batch for one repository.
    async fn send_issues_msg(&self, chat_id: ChatId, batch: &IssueBatch) -> Result<()>;

    /// Sends the separator that follows an issue batch.
    async fn send_separator_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Tells the chat that a repository has no new issues today.
    async fn send_no_new_issues_msg(&self, chat_id: ChatId, repo: &str) -> Result<()>;

    /// Sends a rendered fullness ranking table.
    async fn send_fullness_table_msg(&self, chat_id: ChatId, table: &FullnessTable) -> Result<()>;

    /// Tells the chat that no fullness data is available.
    async fn send_fullness_unavailable_msg(&self, chat_id: ChatId) -> Result<()>;
}

/// Telegram messaging service.
pub struct TelegramMessagingService {
    bot: Bot,
}

impl TelegramMessagingService {
    /// Creates a new service over the given bot.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.bot
            .send_message(chat_id, text)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }
}

#[async_trait]
impl MessagingService for TelegramMessagingService {
    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_text(chat_id, HELP_TEXT.to_string()).await
    }

    async fn send_greeting_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_text(chat_id, GREETING_TEXT.to_string()).await
    }

    async fn send_issues_msg(&self, chat_id: ChatId, batch: &IssueBatch) -> Result<()> {
        self.send_text(chat_id, batch.render()).await
    }

    async fn send_separator_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_text(chat_id, SEPARATOR.to_string()).await
    }

    async fn send_no_new_issues_msg(&self, chat_id: ChatId, repo: &str) -> Result<()> {
        self.send_text(chat_id, format!("No new issues for {repo} today 🌱")).await
    }

    async fn send_fullness_table_msg(&self, chat_id: ChatId, table: &FullnessTable) -> Result<()> {
        // <pre> keeps the fixed-width columns aligned in Telegram clients.
        let text = format!("<pre>{}</pre>", html::escape(&table.render()));

        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_fullness_unavailable_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_text(chat_id, FULLNESS_UNAVAILABLE_TEXT.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_text_names_every_command() {
        for command in ["/help", "/hello", "/new-issues", "/daily-fullness"] {
            assert!(HELP_TEXT.contains(command), "help text missing {command}");
        }
    }

    #[test]
    fn test_separator_is_a_single_blank_looking_character() {
        assert_eq!(SEPARATOR.chars().count(), 1);
        assert!(!SEPARATOR.trim().is_empty(), "must not be plain whitespace or Telegram rejects it");
    }
}
