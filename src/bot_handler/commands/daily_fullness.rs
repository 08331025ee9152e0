use crate::bot_handler::{BotHandlerResult, commands::CommandContext};

pub async fn handle(ctx: CommandContext<'_>) -> BotHandlerResult<()> {
    tracing::debug!("Handling daily-fullness command for chat: {}", ctx.chat_id);

    match ctx.handler.fullness_reporter.daily_report().await {
        Some(table) => {
            ctx.handler.messaging_service.send_fullness_table_msg(ctx.chat_id, &table).await?;
        }
        None => {
            ctx.handler.messaging_service.send_fullness_unavailable_msg(ctx.chat_id).await?;
        }
    }

    Ok(())
}
