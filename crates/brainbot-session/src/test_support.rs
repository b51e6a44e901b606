//! In-memory chat service used by the session tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use brainbot_api::{ApiError, ChatBackend, ConversationSummary, DeleteReply, Exchange};
use brainbot_common::ConversationId;
use chrono::Utc;

struct Conversation {
    summary: ConversationSummary,
    history: Vec<Exchange>,
}

#[derive(Default)]
struct FakeState {
    conversations: Vec<Conversation>,
    next_id: u32,
    calls: Vec<String>,
    fail_list: Option<ApiError>,
    fail_create: Option<ApiError>,
    fail_send: Option<ApiError>,
    fail_messages: Option<ApiError>,
    send_delay: Duration,
    reply: String,
    title_on_first_message: Option<String>,
}

pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub(crate) fn empty() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                next_id: 100,
                reply: "hello".into(),
                ..Default::default()
            }),
        })
    }

    pub(crate) fn with_conversations(ids: &[&str]) -> Arc<Self> {
        let backend = Self::empty();
        {
            let mut state = backend.state.lock().unwrap();
            for id in ids {
                state.conversations.push(Conversation {
                    summary: summary(id, Some(&format!("Chat {id}"))),
                    history: Vec::new(),
                });
            }
        }
        backend
    }

    pub(crate) fn add_history(&self, id: &str, prompt: &str, response: &str) {
        let mut state = self.state.lock().unwrap();
        let conv = state
            .conversations
            .iter_mut()
            .find(|c| c.summary.id.as_str() == id)
            .unwrap();
        conv.history.push(Exchange {
            prompt: prompt.into(),
            response: response.into(),
            timestamp: Utc::now(),
        });
    }

    pub(crate) fn history(&self, id: &ConversationId) -> Vec<Exchange> {
        let state = self.state.lock().unwrap();
        state
            .conversations
            .iter()
            .find(|c| &c.summary.id == id)
            .map(|c| c.history.clone())
            .unwrap_or_default()
    }

    pub(crate) fn set_reply(&self, reply: &str) {
        self.state.lock().unwrap().reply = reply.into();
    }

    pub(crate) fn set_send_delay(&self, delay: Duration) {
        self.state.lock().unwrap().send_delay = delay;
    }

    pub(crate) fn set_title_on_first_message(&self, title: &str) {
        self.state.lock().unwrap().title_on_first_message = Some(title.into());
    }

    pub(crate) fn fail_next_list(&self, err: ApiError) {
        self.state.lock().unwrap().fail_list = Some(err);
    }

    pub(crate) fn fail_next_create(&self, err: ApiError) {
        self.state.lock().unwrap().fail_create = Some(err);
    }

    pub(crate) fn fail_next_send(&self, err: ApiError) {
        self.state.lock().unwrap().fail_send = Some(err);
    }

    pub(crate) fn fail_next_messages(&self, err: ApiError) {
        self.state.lock().unwrap().fail_messages = Some(err);
    }

    /// Number of recorded calls to `op` (e.g. `"create"`).
    pub(crate) fn calls(&self, op: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.calls.iter().filter(|c| c.as_str() == op).count()
    }

    fn record(&self, op: &str) {
        self.state.lock().unwrap().calls.push(op.to_string());
    }
}

fn summary(id: &str, title: Option<&str>) -> ConversationSummary {
    ConversationSummary {
        id: ConversationId::new(id),
        title: title.map(str::to_string),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        self.record("list");
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_list.take() {
            return Err(err);
        }
        Ok(state.conversations.iter().map(|c| c.summary.clone()).collect())
    }

    async fn create_conversation(&self) -> Result<ConversationSummary, ApiError> {
        self.record("create");
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_create.take() {
            return Err(err);
        }
        state.next_id += 1;
        let created = summary(&format!("conv-{}", state.next_id), None);
        state.conversations.insert(
            0,
            Conversation {
                summary: created.clone(),
                history: Vec::new(),
            },
        );
        Ok(created)
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<DeleteReply, ApiError> {
        self.record("delete");
        let mut state = self.state.lock().unwrap();
        let before = state.conversations.len();
        state.conversations.retain(|c| &c.summary.id != id);
        if state.conversations.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(DeleteReply {
            message: "deleted".into(),
        })
    }

    async fn list_messages(&self, id: &ConversationId) -> Result<Vec<Exchange>, ApiError> {
        self.record("messages");
        if let Some(err) = self.state.lock().unwrap().fail_messages.take() {
            return Err(err);
        }
        Ok(self.history(id))
    }

    async fn send_message(&self, id: &ConversationId, prompt: &str) -> Result<Exchange, ApiError> {
        self.record("send");
        let delay = self.state.lock().unwrap().send_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_send.take() {
            return Err(err);
        }
        let reply = state.reply.clone();
        let title = state.title_on_first_message.clone();
        let conv = state
            .conversations
            .iter_mut()
            .find(|c| &c.summary.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        let exchange = Exchange {
            prompt: prompt.into(),
            response: reply,
            timestamp: Utc::now(),
        };
        conv.history.push(exchange.clone());
        if conv.summary.title.is_none() {
            conv.summary.title = title;
        }
        Ok(exchange)
    }
}
