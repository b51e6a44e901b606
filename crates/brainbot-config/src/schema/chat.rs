//! Chat view behaviour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Greeting shown before the first user message of a conversation.
    pub welcome_message: String,
    /// Bot message appended when a send fails.
    pub error_message: String,
    /// Title shown for conversations the server has not named yet.
    pub default_title: String,
    /// Delay between revealed characters of a bot response (1-1000).
    pub typing_interval_ms: u32,
    /// Delay between revealed characters of a conversation title (1-1000).
    pub title_interval_ms: u32,
    /// How long transient notifications stay visible (500-30000).
    pub notification_ttl_ms: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_message: "Hello! I'm BrainBot, your AI assistant. How can I help you today?"
                .into(),
            error_message: "Sorry, there was an error.".into(),
            default_title: "Untitled".into(),
            typing_interval_ms: 20,
            title_interval_ms: 50,
            notification_ttl_ms: 2000,
        }
    }
}

impl ChatConfig {
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.typing_interval_ms))
    }

    pub fn title_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.title_interval_ms))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(u64::from(self.notification_ttl_ms))
    }
}
