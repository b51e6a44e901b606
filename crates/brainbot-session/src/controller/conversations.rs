use std::sync::atomic::Ordering;

use brainbot_common::{ConversationId, Event, Notification};
use tracing::{debug, info, warn};

use super::{NewChatOutcome, SessionController};

impl SessionController {
    /// Re-fetch the conversation list. Failures leave an empty list.
    ///
    /// When the selected conversation's title changed on the server, the new
    /// title is revealed through the title animation.
    pub async fn refresh_conversations(&self) {
        let selected = self.store.selected();
        let title_before = selected
            .as_ref()
            .and_then(|id| self.store.get(id))
            .map(|c| c.title);

        if let Err(e) = self.store.refresh().await {
            self.handle_api_error(&e);
        }
        self.events.publish(Event::ConversationsChanged);

        let now_selected = self.store.selected();
        if now_selected != selected {
            self.events.publish(Event::SelectionChanged(now_selected.clone()));
            let provisioning = self.sending_first_message.load(Ordering::Acquire);
            if let Some(id) = now_selected.filter(|_| !provisioning) {
                self.load_messages(&id).await;
            }
            return;
        }

        let (Some(id), Some(before)) = (selected, title_before) else {
            return;
        };
        let after = self.store.get(&id).and_then(|c| c.title);
        match after {
            Some(title) if Some(&title) != before.as_ref() && !title.trim().is_empty() => {
                self.animate_title(id, title);
            }
            _ => {}
        }
    }

    fn animate_title(&self, id: ConversationId, title: String) {
        debug!(conversation = %id, "revealing new title");
        let view = self.view.clone();
        let events = self.events.clone();
        // Runs on its own; the handle is not awaited.
        let _ = self.animator.animate_title(
            title,
            self.settings.title_interval,
            move |partial| {
                if let Ok(mut v) = view.lock() {
                    v.title_reveal = Some((id.clone(), partial.to_string()));
                }
                events.publish(Event::TitleTyping {
                    id: id.clone(),
                    partial: partial.to_string(),
                });
            },
        );
    }

    /// Replace the message buffer with the server history of `id`.
    /// Failures are logged and leave the buffer as it was.
    pub async fn load_messages(&self, id: &ConversationId) {
        if id.is_temporary() {
            return;
        }
        match self.buffer.load(id).await {
            Ok(_) => {
                self.events.publish(Event::MessagesChanged);
            }
            Err(e) => {
                warn!(conversation = %id, "failed to load messages: {e}");
                self.handle_api_error(&e);
            }
        }
    }

    /// Reload the history of whatever is selected.
    pub async fn reload_selected(&self) {
        if let Some(id) = self.store.selected() {
            self.load_messages(&id).await;
        }
    }

    /// Switch the view to another conversation.
    pub async fn select_conversation(&self, id: ConversationId) {
        if self.store.selected().as_ref() == Some(&id) {
            return;
        }
        info!(conversation = %id, "conversation selected");
        self.store.select(Some(id.clone()));
        self.buffer.reset();
        self.events.publish(Event::SelectionChanged(Some(id.clone())));
        self.events.publish(Event::MessagesChanged);

        if self.sending_first_message.load(Ordering::Acquire) {
            debug!("skipping history fetch while a conversation is provisioned");
            return;
        }
        self.load_messages(&id).await;
    }

    /// Start a fresh conversation.
    ///
    /// Refused with a transient notification while the selected conversation
    /// has no messages yet.
    pub async fn new_chat(&self) -> NewChatOutcome {
        let selected = self.store.selected();
        if selected.is_some() && self.buffer.is_empty() {
            debug!("new chat refused: current conversation is empty");
            self.notify(
                Notification::info(
                    "New chat",
                    "Send a message before starting a new conversation.",
                )
                .with_ttl(self.settings.notification_ttl),
            );
            return NewChatOutcome::Rejected;
        }

        let id = match self.store.create().await {
            Ok(id) => id,
            Err(e) => {
                warn!("failed to create conversation: {e}");
                self.handle_api_error(&e);
                self.notify(
                    Notification::error("New chat", "Could not create a conversation.")
                        .with_ttl(self.settings.notification_ttl),
                );
                return NewChatOutcome::Failed;
            }
        };

        self.store.select(Some(id.clone()));
        self.buffer.reset();
        self.refresh_conversations().await;
        self.events.publish(Event::SelectionChanged(Some(id.clone())));
        self.events.publish(Event::MessagesChanged);
        info!(conversation = %id, "new chat started");
        NewChatOutcome::Created(id)
    }

    /// Delete a conversation. If it was selected, the buffer is cleared and
    /// the first remaining conversation becomes selected.
    pub async fn delete_conversation(&self, id: &ConversationId) -> bool {
        match self.store.delete(id).await {
            Ok(was_selected) => {
                if was_selected {
                    self.buffer.reset();
                    self.events.publish(Event::SelectionChanged(self.store.selected()));
                    self.events.publish(Event::MessagesChanged);
                }
                self.events.publish(Event::ConversationsChanged);
                info!(conversation = %id, "conversation deleted");
                true
            }
            Err(e) => {
                warn!(conversation = %id, "failed to delete conversation: {e}");
                self.handle_api_error(&e);
                self.notify(
                    Notification::error("Delete", format!("Could not delete conversation: {e}"))
                        .with_ttl(self.settings.notification_ttl),
                );
                false
            }
        }
    }
}
