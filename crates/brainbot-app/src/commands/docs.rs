use brainbot_api::{DocumentStore, Page};
use brainbot_common::BrainbotError;

use crate::cli::DocsCommand;
use crate::context::AppContext;

pub(super) async fn run(ctx: &AppContext, cmd: DocsCommand) -> Result<(), BrainbotError> {
    ctx.require_page(Page::Documents)?;
    match cmd {
        DocsCommand::List => {
            let documents = ctx
                .backend
                .list_documents()
                .await
                .map_err(|e| ctx.fail(e))?;
            if documents.is_empty() {
                println!("No documents uploaded.");
            }
            for doc in &documents {
                println!("{:<40} {:<6} {}", doc.file_name, doc.extension(), doc.uploaded_at);
            }
        }
        DocsCommand::Upload { path } => {
            let message = ctx
                .backend
                .upload_document(&path)
                .await
                .map_err(|e| ctx.fail(e))?;
            println!("{message}");
        }
        DocsCommand::Delete { name } => {
            ctx.backend
                .delete_document(&name)
                .await
                .map_err(|e| ctx.fail(e))?;
            println!("Deleted {name}.");
        }
    }
    Ok(())
}
