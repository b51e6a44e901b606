//! One module per command group.

mod account;
mod admin;
mod chat;
mod conversations;
mod docs;
mod evaluations;

use std::io::Write;

use brainbot_common::BrainbotError;

use crate::cli::Command;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, command: Command) -> Result<(), BrainbotError> {
    match command {
        Command::Login { username, password } => account::login(ctx, &username, password).await,
        Command::Logout => account::logout(ctx).await,
        Command::Whoami => account::whoami(ctx),
        Command::Pages => account::pages(ctx),
        Command::Chat { conversation } => chat::run(ctx, conversation).await,
        Command::Conversations(cmd) => conversations::run(ctx, cmd).await,
        Command::Users(cmd) => admin::run(ctx, cmd).await,
        Command::Docs(cmd) => docs::run(ctx, cmd).await,
        Command::Password(cmd) => account::password(ctx, cmd).await,
        Command::Evaluations { output } => evaluations::run(ctx, output).await,
        Command::Config => {
            println!("{}", brainbot_config::config_to_json(&ctx.config));
            Ok(())
        }
    }
}

/// Ask for one line on stdin.
pub(crate) fn prompt(label: &str) -> Result<String, BrainbotError> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = tokio::task::block_in_place(|| std::io::stdin().read_line(&mut line))?;
    if read == 0 {
        return Err(BrainbotError::Other(format!("no input for {label}")));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
