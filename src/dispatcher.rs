use std::sync::Arc;

use teloxide::{
    dispatching::DefaultKey,
    dptree::deps,
    prelude::*,
    types::{Message, Update},
};

use crate::bot_handler::{BotHandler, BotHandlerError, Command};

/// Encapsulates the dispatcher logic for the bot.
pub struct BotDispatcher {
    handler: Arc<BotHandler>,
}

impl BotDispatcher {
    /// Creates a new `BotDispatcher`.
    pub fn new(handler: Arc<BotHandler>) -> Self {
        Self { handler }
    }

    /// Builds the dispatcher using the provided `bot` instance.
    ///
    /// Only recognized commands reach an endpoint; everything else falls
    /// through and the bot stays silent.
    #[must_use = "This function returns a Dispatcher that should not be ignored"]
    pub fn build(&self, bot: Bot) -> Dispatcher<Bot, BotHandlerError, DefaultKey> {
        Dispatcher::builder(
            bot,
            dptree::entry().branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        msg.from.as_ref().map(|user| !user.is_bot).unwrap_or(true)
                    })
                    .filter_command::<Command>()
                    .endpoint(|msg: Message, cmd: Command, handler: Arc<BotHandler>| async move {
                        handler.handle_commands(&msg, cmd).await
                    }),
            ),
        )
        .dependencies(deps![self.handler.clone()])
        .enable_ctrlc_handler()
        .build()
    }
}
