//! Ordered messages of the selected conversation.

use std::sync::{Arc, Mutex};

use brainbot_api::{ApiError, ChatBackend, Exchange};
use brainbot_common::ConversationId;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::message::{normalize_text, Message};

pub struct MessageBuffer {
    backend: Arc<dyn ChatBackend>,
    messages: Mutex<Vec<Message>>,
}

impl MessageBuffer {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Replace the buffer with the server's history for `id`.
    ///
    /// On failure the buffer is left untouched.
    pub async fn load(&self, id: &ConversationId) -> Result<usize, ApiError> {
        let history = self.backend.list_messages(id).await?;
        let messages = flatten(&history);
        let count = messages.len();
        if let Ok(mut slot) = self.messages.lock() {
            *slot = messages;
        }
        debug!(conversation = %id, count, "message buffer loaded");
        Ok(count)
    }

    pub fn reset(&self) {
        if let Ok(mut slot) = self.messages.lock() {
            slot.clear();
        }
    }

    /// Insert the greeting as the first message if the buffer is empty.
    /// Returns whether it was inserted.
    pub fn ensure_welcome(&self, welcome: &str) -> bool {
        let Ok(mut slot) = self.messages.lock() else {
            return false;
        };
        if !slot.is_empty() {
            return false;
        }
        slot.push(Message::bot(1, welcome, Utc::now()));
        true
    }

    pub fn push_user(&self, text: &str, timestamp: DateTime<Utc>) -> u64 {
        self.push(text, false, timestamp)
    }

    pub fn push_bot(&self, text: &str, timestamp: DateTime<Utc>) -> u64 {
        self.push(text, true, timestamp)
    }

    fn push(&self, text: &str, is_bot: bool, timestamp: DateTime<Utc>) -> u64 {
        let Ok(mut slot) = self.messages.lock() else {
            return 0;
        };
        let id = slot.len() as u64 + 1;
        slot.push(Message {
            id,
            text: text.to_string(),
            is_bot,
            timestamp,
        });
        id
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .map(|slot| slot.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|slot| slot.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flatten round trips into user/bot pairs with ids `2k+1` and `2k+2`.
pub(crate) fn flatten(history: &[Exchange]) -> Vec<Message> {
    history
        .iter()
        .enumerate()
        .flat_map(|(k, exchange)| {
            let k = k as u64;
            [
                Message::user(2 * k + 1, normalize_text(&exchange.prompt), exchange.timestamp),
                Message::bot(2 * k + 2, normalize_text(&exchange.response), exchange.timestamp),
            ]
        })
        .collect()
}
