//! The message send flow.

use std::sync::atomic::Ordering;

use brainbot_api::ApiError;
use brainbot_common::{new_correlation_id, ConversationId, Event};
use chrono::Utc;
use tracing::{debug, info, info_span, warn, Instrument};

use super::guard::BusyGuard;
use super::{SessionController, SubmitOutcome};
use crate::animator::AnimationOutcome;
use crate::message::normalize_text;

impl SessionController {
    /// Submit user input.
    ///
    /// Blank input is ignored. While a previous submission is still in
    /// flight the call returns [`SubmitOutcome::Busy`] without touching
    /// state. Otherwise the user message is appended at once, a
    /// conversation is provisioned if none is selected, and the response is
    /// revealed, committed, and reconciled with the server.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!("submit refused: a send is already in flight");
            return SubmitOutcome::Busy;
        };

        let span = info_span!("submit", correlation_id = %new_correlation_id());
        self.run_submit(text).instrument(span).await
    }

    async fn run_submit(&self, text: &str) -> SubmitOutcome {
        if self.buffer.ensure_welcome(&self.settings.welcome_message) {
            debug!("inserted welcome message");
        }
        self.buffer.push_user(text, Utc::now());
        self.set_typing(true);
        self.events.publish(Event::MessagesChanged);

        let id = match self.store.selected() {
            Some(id) if !id.is_temporary() => id,
            _ => match self.provision().await {
                Ok(id) => id,
                Err(e) => return self.fail(e, None).await,
            },
        };

        info!(conversation = %id, chars = text.chars().count(), "sending message");
        let exchange = match self.backend.send_message(&id, text).await {
            Ok(exchange) => exchange,
            Err(e) => return self.fail(e, Some(&id)).await,
        };

        let full = normalize_text(&exchange.response);
        let view = self.view.clone();
        let events = self.events.clone();
        let handle = self.animator.animate_text(
            full.clone(),
            self.settings.typing_interval,
            move |partial| {
                if let Ok(mut v) = view.lock() {
                    v.pending = Some(partial.to_string());
                }
                events.publish(Event::Typing {
                    partial: partial.to_string(),
                });
            },
        );
        if handle.finished().await == AnimationOutcome::Superseded {
            debug!("response animation superseded; committing full text");
        }

        // The user may have switched away while the response was revealed.
        let still_selected = self.store.selected().as_ref() == Some(&id);
        if still_selected {
            self.buffer.push_bot(&full, exchange.timestamp);
        }
        self.set_typing(false);
        self.events.publish(Event::MessagesChanged);

        self.refresh_conversations().await;
        let was_provisioning = self.sending_first_message.swap(false, Ordering::AcqRel);
        match self.store.selected() {
            Some(current) if current == id => self.load_messages(&id).await,
            // A switch made while provisioning skipped its history fetch.
            Some(current) if was_provisioning => self.load_messages(&current).await,
            _ => {}
        }

        info!(conversation = %id, "message exchange complete");
        SubmitOutcome::Sent
    }

    /// Create a conversation for a first message sent with nothing selected.
    async fn provision(&self) -> Result<ConversationId, ApiError> {
        self.sending_first_message.store(true, Ordering::Release);
        self.store.select(Some(ConversationId::temporary()));
        self.events.publish(Event::SelectionChanged(self.store.selected()));

        let id = self.store.create().await?;
        self.refresh_conversations().await;
        self.store.select(Some(id.clone()));
        self.events.publish(Event::SelectionChanged(Some(id.clone())));
        info!(conversation = %id, "provisioned conversation for first message");
        Ok(id)
    }

    /// Terminal failure of one attempt: append the error message and return
    /// to idle.
    async fn fail(&self, err: ApiError, id: Option<&ConversationId>) -> SubmitOutcome {
        match id {
            Some(id) => warn!(conversation = %id, "message send failed: {err}"),
            None => warn!("conversation provisioning failed: {err}"),
        }
        self.handle_api_error(&err);

        // Only the conversation this attempt belongs to gets the error line.
        let selected = self.store.selected();
        let owns_view = selected
            .as_ref()
            .map_or(true, |s| s.is_temporary() || Some(s) == id);
        if selected.as_ref().is_some_and(|s| s.is_temporary()) {
            self.store.select(None);
            self.events.publish(Event::SelectionChanged(None));
        }
        if owns_view {
            self.buffer.push_bot(&self.settings.error_message, Utc::now());
        }
        self.set_typing(false);
        let was_provisioning = self.sending_first_message.swap(false, Ordering::AcqRel);
        self.events.publish(Event::MessagesChanged);

        // A switch made while provisioning skipped its history fetch.
        if was_provisioning && !owns_view {
            if let Some(current) = self.store.selected() {
                self.load_messages(&current).await;
            }
        }
        SubmitOutcome::Failed
    }
}
