//! Cached conversation summaries and the current selection.

use std::sync::{Arc, Mutex};

use brainbot_api::{ApiError, ChatBackend, ConversationSummary};
use brainbot_common::ConversationId;
use tracing::{debug, warn};

#[derive(Default)]
struct StoreState {
    conversations: Vec<ConversationSummary>,
    selected: Option<ConversationId>,
}

/// Mirror of the server's conversation list. Never locally authoritative.
pub struct ConversationStore {
    backend: Arc<dyn ChatBackend>,
    state: Mutex<StoreState>,
}

impl ConversationStore {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Replace the cache with the server's list, in server order.
    ///
    /// Selects the first entry when nothing is selected. On failure the cache
    /// is emptied and the error is returned for the caller to log.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let result = self.backend.list_conversations().await;
        let Ok(mut state) = self.state.lock() else {
            return Ok(0);
        };
        match result {
            Ok(list) => {
                if state.selected.is_none() {
                    state.selected = list.first().map(|c| c.id.clone());
                }
                state.conversations = list;
                debug!(count = state.conversations.len(), "conversation list refreshed");
                Ok(state.conversations.len())
            }
            Err(e) => {
                warn!("failed to fetch conversations: {e}");
                state.conversations.clear();
                Err(e)
            }
        }
    }

    /// Ask the server for a new conversation and cache it.
    pub async fn create(&self) -> Result<ConversationId, ApiError> {
        let summary = self.backend.create_conversation().await?;
        let id = summary.id.clone();
        if let Ok(mut state) = self.state.lock() {
            if !state.conversations.iter().any(|c| c.id == id) {
                state.conversations.push(summary);
            }
        }
        debug!(conversation = %id, "conversation created");
        Ok(id)
    }

    /// Delete on the server, then drop it from the cache.
    ///
    /// Returns whether the deleted conversation was the selected one; if so
    /// the first remaining conversation (or nothing) becomes selected.
    pub async fn delete(&self, id: &ConversationId) -> Result<bool, ApiError> {
        self.backend.delete_conversation(id).await?;
        let Ok(mut state) = self.state.lock() else {
            return Ok(false);
        };
        state.conversations.retain(|c| &c.id != id);
        let was_selected = state.selected.as_ref() == Some(id);
        if was_selected {
            state.selected = state.conversations.first().map(|c| c.id.clone());
        }
        debug!(conversation = %id, was_selected, "conversation deleted");
        Ok(was_selected)
    }

    pub fn select(&self, id: Option<ConversationId>) {
        if let Ok(mut state) = self.state.lock() {
            state.selected = id;
        }
    }

    pub fn selected(&self) -> Option<ConversationId> {
        self.state.lock().ok().and_then(|s| s.selected.clone())
    }

    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.state
            .lock()
            .map(|s| s.conversations.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, id: &ConversationId) -> Option<ConversationSummary> {
        let state = self.state.lock().ok()?;
        state.conversations.iter().find(|c| &c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.conversations.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
