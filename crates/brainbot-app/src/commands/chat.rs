//! Interactive chat loop.

use std::io::Write;
use std::sync::Arc;

use brainbot_api::Page;
use brainbot_common::{BrainbotError, ConversationId, Event, EventBus};
use brainbot_session::{NewChatOutcome, SessionController, SessionSettings, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::Receiver;
use tracing::info;

use crate::context::AppContext;
use crate::repl::{resolve_target, ReplCommand, TypingPrinter};

const HELP: &str = "\
Type a message and press Enter to send it.
  /new              start a new conversation
  /list             list conversations
  /switch <n|id>    open a conversation
  /delete [<n|id>]  delete a conversation (default: the open one)
  /history          show the open conversation
  /quit             leave";

pub(super) async fn run(ctx: &AppContext, conversation: Option<String>) -> Result<(), BrainbotError> {
    let credential = ctx.require_page(Page::Chat)?;
    let events = Arc::new(EventBus::default());
    let controller = SessionController::new(
        ctx.backend.clone(),
        SessionSettings::from_config(&ctx.config),
        events.clone(),
    )
    .with_credential_store(ctx.credentials.clone());
    let mut rx = events.subscribe();

    controller.start().await;
    if let Some(id) = conversation {
        controller.select_conversation(ConversationId::new(id)).await;
    }
    info!(user = %credential.user.user_name, "chat started");

    println!(
        "Signed in as {}. Type /help for commands.",
        credential.user.user_name
    );
    print_history(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let result = loop {
        if drain(&mut rx) {
            break Err(BrainbotError::Auth(
                "the server rejected the session, run `brainbot login`".into(),
            ));
        }
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break Ok(());
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Message(text) => send(&controller, &mut rx, &text).await,
            ReplCommand::New => {
                if let NewChatOutcome::Created(id) = controller.new_chat().await {
                    println!("Started {id}.");
                }
            }
            ReplCommand::List => print_conversations(&controller),
            ReplCommand::Switch(target) => {
                let id = resolve_target(&target, &controller.conversations());
                controller.select_conversation(id).await;
                print_history(&controller);
            }
            ReplCommand::Delete(target) => {
                let id = match target {
                    Some(t) => resolve_target(&t, &controller.conversations()),
                    None => match controller.selected() {
                        Some(id) => id,
                        None => {
                            println!("No conversation is open.");
                            continue;
                        }
                    },
                };
                if controller.delete_conversation(&id).await {
                    println!("Deleted {id}.");
                    controller.reload_selected().await;
                    print_history(&controller);
                }
            }
            ReplCommand::History => print_history(&controller),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break Ok(()),
            ReplCommand::Unknown(cmd) => println!("Unknown command {cmd}. Type /help."),
        }
    };

    controller.shutdown();
    result
}

/// Submit and print the response as it is revealed.
async fn send(controller: &SessionController, rx: &mut Receiver<Event>, text: &str) {
    let mut printer = TypingPrinter::default();
    let submit = controller.submit(text);
    tokio::pin!(submit);

    let outcome = loop {
        tokio::select! {
            outcome = &mut submit => break outcome,
            event = rx.recv() => {
                if let Ok(event) = event {
                    render(&mut printer, &event);
                }
            }
        }
    };
    while let Ok(event) = rx.try_recv() {
        render(&mut printer, &event);
    }
    if printer.started() {
        println!();
    }

    match outcome {
        SubmitOutcome::Failed => {
            if let Some(last) = controller.messages().last() {
                println!("bot: {}", last.text);
            }
        }
        SubmitOutcome::Busy => println!("Still waiting for the previous response."),
        SubmitOutcome::Sent | SubmitOutcome::Ignored => {}
    }
}

fn render(printer: &mut TypingPrinter, event: &Event) {
    let was_started = printer.started();
    if let Some(fresh) = printer.unseen(event) {
        if !was_started {
            print!("bot: ");
        }
        print!("{fresh}");
        let _ = std::io::stdout().flush();
        return;
    }
    match event {
        Event::Notification(body) => println!("! {body}"),
        Event::ReauthRequired => println!("! Session expired. Run `brainbot login`."),
        _ => {}
    }
}

/// Print pending notifications; true once the session has been rejected.
fn drain(rx: &mut Receiver<Event>) -> bool {
    let mut reauth = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            Event::Notification(body) => println!("! {body}"),
            Event::ReauthRequired => reauth = true,
            _ => {}
        }
    }
    reauth
}

fn print_conversations(controller: &SessionController) {
    let selected = controller.selected();
    let conversations = controller.conversations();
    if conversations.is_empty() {
        println!("No conversations yet. Send a message to start one.");
    }
    for (i, c) in conversations.iter().enumerate() {
        let marker = if selected.as_ref() == Some(&c.id) { "*" } else { " " };
        println!("{marker}{:>3}. {}", i + 1, controller.title_of(&c.id));
    }
}

fn print_history(controller: &SessionController) {
    if let Some(id) = controller.selected() {
        println!("-- {} --", controller.title_of(&id));
    }
    let messages = controller.messages();
    if messages.is_empty() {
        println!("bot: {}", controller.settings().welcome_message);
    }
    for m in messages {
        let who = if m.is_bot { "bot" } else { "you" };
        println!("{who}: {}", m.text);
    }
}
