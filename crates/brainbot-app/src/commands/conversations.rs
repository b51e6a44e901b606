use brainbot_api::{ChatBackend, Page};
use brainbot_common::{BrainbotError, ConversationId};
use chrono::Local;

use crate::cli::ConversationsCommand;
use crate::context::AppContext;

pub(super) async fn run(ctx: &AppContext, cmd: ConversationsCommand) -> Result<(), BrainbotError> {
    ctx.require_page(Page::Chat)?;
    match cmd {
        ConversationsCommand::List => {
            let conversations = ctx
                .backend
                .list_conversations()
                .await
                .map_err(|e| ctx.fail(e))?;
            if conversations.is_empty() {
                println!("No conversations yet.");
            }
            for (i, c) in conversations.iter().enumerate() {
                let title = c
                    .title
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or(&ctx.config.chat.default_title);
                println!(
                    "{:>3}. {:<28} {}  ({})",
                    i + 1,
                    title,
                    c.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    c.id
                );
            }
        }
        ConversationsCommand::Delete { id } => {
            let reply = ctx
                .backend
                .delete_conversation(&ConversationId::new(id.as_str()))
                .await
                .map_err(|e| ctx.fail(e))?;
            if reply.message.is_empty() {
                println!("Deleted {id}.");
            } else {
                println!("{}", reply.message);
            }
        }
    }
    Ok(())
}
