//! Session controller: the message send state machine and conversation
//! lifecycle operations.
//!
//! State is split between the [`ConversationStore`], the [`MessageBuffer`] and
//! a small view state (pending bot text, typing flag, title reveal,
//! notifications). Every lock is short-lived and released before an `.await`.

mod conversations;
mod guard;
mod send;


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use brainbot_api::{ApiError, ChatBackend, ConversationSummary, CredentialStore};
use brainbot_common::{ConversationId, Event, EventBus, Notification, NotificationQueue};
use brainbot_config::{BrainbotConfig, UnauthorizedPolicy};
use tracing::{error, info, warn};

use crate::animator::TypingAnimator;
use crate::buffer::MessageBuffer;
use crate::message::Message;
use crate::store::ConversationStore;

/// Chat behaviour knobs, usually taken from `[chat]` and `[auth]` config.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub welcome_message: String,
    pub error_message: String,
    pub default_title: String,
    pub typing_interval: Duration,
    pub title_interval: Duration,
    pub notification_ttl: Duration,
    pub on_unauthorized: UnauthorizedPolicy,
}

impl SessionSettings {
    pub fn from_config(config: &BrainbotConfig) -> Self {
        Self {
            welcome_message: config.chat.welcome_message.clone(),
            error_message: config.chat.error_message.clone(),
            default_title: config.chat.default_title.clone(),
            typing_interval: config.chat.typing_interval(),
            title_interval: config.chat.title_interval(),
            notification_ttl: config.chat.notification_ttl(),
            on_unauthorized: config.auth.on_unauthorized,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&BrainbotConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// Another send is still in flight; nothing happened.
    Busy,
    /// The response was revealed, committed and reconciled.
    Sent,
    /// The round trip failed and the error message was appended.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewChatOutcome {
    Created(ConversationId),
    /// The selected conversation is still empty; a notification was raised.
    Rejected,
    Failed,
}

#[derive(Default)]
pub(crate) struct ViewState {
    pub(crate) pending: Option<String>,
    pub(crate) typing: bool,
    pub(crate) title_reveal: Option<(ConversationId, String)>,
    pub(crate) notifications: NotificationQueue,
}

pub struct SessionController {
    pub(crate) settings: SessionSettings,
    pub(crate) backend: Arc<dyn ChatBackend>,
    pub(crate) store: ConversationStore,
    pub(crate) buffer: MessageBuffer,
    pub(crate) animator: TypingAnimator,
    pub(crate) events: Arc<EventBus>,
    pub(crate) view: Arc<Mutex<ViewState>>,
    credentials: Option<Arc<dyn CredentialStore>>,
    /// Held for the whole send flow; a second submit is refused.
    pub(crate) busy: AtomicBool,
    /// Set while a just-created conversation is being provisioned; selection
    /// changes skip the history fetch while it is set.
    pub(crate) sending_first_message: AtomicBool,
}

impl SessionController {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        settings: SessionSettings,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            settings,
            store: ConversationStore::new(backend.clone()),
            buffer: MessageBuffer::new(backend.clone()),
            backend,
            animator: TypingAnimator::new(),
            events,
            view: Arc::new(Mutex::new(ViewState::default())),
            credentials: None,
            busy: AtomicBool::new(false),
            sending_first_message: AtomicBool::new(false),
        }
    }

    /// Credential store cleared when the server rejects the session.
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Initial fetch: conversation list, then the selected history.
    pub async fn start(&self) {
        let before = self.store.selected();
        self.refresh_conversations().await;
        // A refresh that changes the selection already loaded its history.
        if let Some(id) = self.store.selected().filter(|id| before.as_ref() == Some(id)) {
            self.load_messages(&id).await;
        }
        info!(
            conversations = self.store.len(),
            messages = self.buffer.len(),
            "chat session ready"
        );
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn backend(&self) -> &Arc<dyn ChatBackend> {
        &self.backend
    }

    pub fn selected(&self) -> Option<ConversationId> {
        self.store.selected()
    }

    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.store.conversations()
    }

    /// Title to show for `id`, falling back to the default title.
    pub fn title_of(&self, id: &ConversationId) -> String {
        self.store
            .get(id)
            .and_then(|c| c.title)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_title.clone())
    }

    pub fn messages(&self) -> Vec<Message> {
        self.buffer.messages()
    }

    /// The bot text revealed so far, while an animation runs.
    pub fn pending(&self) -> Option<String> {
        self.view.lock().ok().and_then(|v| v.pending.clone())
    }

    /// True from submit until the response is committed.
    pub fn is_typing(&self) -> bool {
        self.view.lock().map(|v| v.typing).unwrap_or(false)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Partially revealed title of the selected conversation, if animating.
    pub fn title_reveal(&self) -> Option<(ConversationId, String)> {
        self.view.lock().ok().and_then(|v| v.title_reveal.clone())
    }

    /// Notifications that have not yet expired.
    pub fn notifications(&self) -> Vec<Notification> {
        self.view
            .lock()
            .map(|mut v| v.notifications.visible().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Stop running animations and tell views to go away.
    pub fn shutdown(&self) {
        self.animator.cancel_all();
        self.events.publish(Event::Shutdown);
    }

    pub(crate) fn set_typing(&self, typing: bool) {
        if let Ok(mut v) = self.view.lock() {
            v.typing = typing;
            if !typing {
                v.pending = None;
            }
        }
    }

    pub(crate) fn notify(&self, notification: Notification) {
        let body = notification.body.clone();
        if let Ok(mut v) = self.view.lock() {
            v.notifications.push(notification);
        }
        self.events.publish(Event::Notification(body));
    }

    /// Apply the configured policy to a rejected session.
    pub(crate) fn handle_api_error(&self, err: &ApiError) {
        if !err.is_unauthorized() {
            return;
        }
        match self.settings.on_unauthorized {
            UnauthorizedPolicy::Reauthenticate => {
                warn!("session rejected by server, signing out");
                if let Some(store) = &self.credentials {
                    if let Err(e) = store.clear() {
                        error!("failed to clear stored credential: {e}");
                    }
                }
                self.events.publish(Event::ReauthRequired);
            }
            UnauthorizedPolicy::PassThrough => {
                warn!("request unauthorized; continuing per on_unauthorized = pass-through");
                self.notify(
                    Notification::warning("Session", "The server rejected the request.")
                        .with_ttl(self.settings.notification_ttl),
                );
            }
        }
    }
}
