use crate::bot_handler::{BotHandlerResult, commands::CommandContext};

/// On-demand issue check.
///
/// Unlike the scheduled path, a repository without new issues gets an
/// explicit notice here; the user asked and deserves an answer per repo.
pub async fn handle(ctx: CommandContext<'_>) -> BotHandlerResult<()> {
    tracing::debug!("Handling new-issues command for chat: {}", ctx.chat_id);

    for repo in &ctx.handler.monitored_repos {
        match ctx.handler.issue_fetcher.fetch_open_issues(repo).await {
            Ok(Some(batch)) => {
                ctx.handler.messaging_service.send_issues_msg(ctx.chat_id, &batch).await?;
                ctx.handler.messaging_service.send_separator_msg(ctx.chat_id).await?;
            }
            Ok(None) => {
                ctx.handler.messaging_service.send_no_new_issues_msg(ctx.chat_id, repo).await?;
            }
            Err(e) => {
                tracing::error!("Issue fetch failed for {repo}: {e}");
            }
        }
    }

    Ok(())
}
