//! API layer for the BrainBot client.
//!
//! Provides the backend seams the rest of the client talks through:
//! - `ChatBackend` for conversations and messages
//! - `IdentityBackend` for login and password flows
//! - `UserDirectory` for the admin console
//! - `DocumentStore` for document upload and management
//! - `EvaluationReports` for the admin evaluation chart
//!
//! `HttpBackend` implements all five over reqwest with bearer-token auth.

pub mod auth;
pub mod documents;
pub mod evaluations;
pub mod http;
pub mod models;
pub mod users;

use std::path::Path;

use async_trait::async_trait;
use brainbot_common::ConversationId;

pub use auth::{
    validate_password_change, validate_password_reset, CredentialStore, CurrentUser,
    FileCredentialStore, LoginResponse, MemoryCredentialStore, Page, Role, SessionCredential,
    MIN_PASSWORD_LEN,
};
pub use documents::DocumentItem;
pub use evaluations::EvaluationChart;
pub use http::{HttpBackend, HttpConfig};
pub use models::{ConversationSummary, DeleteReply, Exchange};
pub use users::{AccountStatus, NewUser, UserEdit, UserFilter, UserRecord};

/// The chat service: conversations and their prompt/response history.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError>;

    async fn create_conversation(&self) -> Result<ConversationSummary, ApiError>;

    async fn delete_conversation(&self, id: &ConversationId) -> Result<DeleteReply, ApiError>;

    async fn list_messages(&self, id: &ConversationId) -> Result<Vec<Exchange>, ApiError>;

    async fn send_message(&self, id: &ConversationId, prompt: &str) -> Result<Exchange, ApiError>;
}

#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn forgot_password(&self, email: &str) -> Result<String, ApiError>;

    async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<String, ApiError>;

    async fn update_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, ApiError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;

    async fn create_user(&self, user: &NewUser) -> Result<String, ApiError>;

    async fn edit_user(&self, edit: &UserEdit) -> Result<(), ApiError>;

    async fn set_locked(&self, email: &str, lock: bool) -> Result<(), ApiError>;

    async fn delete_user(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentItem>, ApiError>;

    async fn upload_document(&self, path: &Path) -> Result<String, ApiError>;

    async fn delete_document(&self, file_name: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait EvaluationReports: Send + Sync {
    async fn evaluation_chart(&self) -> Result<EvaluationChart, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Your account is locked. Please contact administration for assistance.")]
    AccountLocked,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
