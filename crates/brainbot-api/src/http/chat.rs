use async_trait::async_trait;
use brainbot_common::ConversationId;
use reqwest::Method;

use super::client::HttpBackend;
use crate::models::{ConversationSummary, DeleteReply, Exchange, SendMessageBody};
use crate::{ApiError, ChatBackend};

const CONVERSATIONS: &str = "conversations";
const MESSAGES: &str = "messages";

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        let url = Self::endpoint(&self.config.chat_url, &[CONVERSATIONS])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn create_conversation(&self) -> Result<ConversationSummary, ApiError> {
        let url = Self::endpoint(&self.config.chat_url, &[CONVERSATIONS])?;
        self.send_json(self.request(Method::POST, url)).await
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<DeleteReply, ApiError> {
        let url = Self::endpoint(&self.config.chat_url, &[CONVERSATIONS, id.as_str()])?;
        let message = self.send_for_message(self.request(Method::DELETE, url)).await?;
        Ok(DeleteReply { message })
    }

    async fn list_messages(&self, id: &ConversationId) -> Result<Vec<Exchange>, ApiError> {
        let url = Self::endpoint(&self.config.chat_url, &[CONVERSATIONS, id.as_str(), MESSAGES])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn send_message(&self, id: &ConversationId, prompt: &str) -> Result<Exchange, ApiError> {
        let url = Self::endpoint(&self.config.chat_url, &[CONVERSATIONS, id.as_str(), MESSAGES])?;
        let body = SendMessageBody { prompt };
        self.send_json(self.request(Method::POST, url).json(&body)).await
    }
}
