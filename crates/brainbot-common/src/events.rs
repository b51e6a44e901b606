use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::ConversationId;

/// State changes published by the session core for whatever view is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ConversationsChanged,
    SelectionChanged(Option<ConversationId>),
    MessagesChanged,
    /// The bot response revealed so far.
    Typing { partial: String },
    /// The conversation title revealed so far.
    TitleTyping { id: ConversationId, partial: String },
    Notification(String),
    ReauthRequired,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
