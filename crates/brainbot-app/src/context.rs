//! Shared state for every command: config, HTTP backend, stored credential.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use brainbot_api::{
    ApiError, CredentialStore, FileCredentialStore, HttpBackend, HttpConfig, Page,
    SessionCredential,
};
use brainbot_common::BrainbotError;
use brainbot_config::{BrainbotConfig, UnauthorizedPolicy};
use chrono::Utc;
use tracing::{debug, warn};

pub struct AppContext {
    pub config: BrainbotConfig,
    pub backend: Arc<HttpBackend>,
    pub credentials: Arc<FileCredentialStore>,
}

impl AppContext {
    pub fn new(config: BrainbotConfig) -> Result<Self, BrainbotError> {
        let backend = HttpBackend::new(http_config(&config)).map_err(api_error)?;
        let path = credentials_path(&config)?;
        debug!(path = %path.display(), "credential store");
        Ok(Self {
            config,
            backend: Arc::new(backend),
            credentials: Arc::new(FileCredentialStore::new(path)),
        })
    }

    /// The stored credential, installed on the backend.
    ///
    /// Expired credentials are discarded and reported as signed out.
    pub fn require_session(&self) -> Result<SessionCredential, BrainbotError> {
        let credential = self
            .credentials
            .load()
            .ok_or_else(|| BrainbotError::Auth("run `brainbot login` first".into()))?;
        if !credential.is_valid(Utc::now()) {
            if let Err(e) = self.credentials.clear() {
                warn!("failed to clear expired credential: {e}");
            }
            return Err(BrainbotError::Auth(
                "session expired, run `brainbot login`".into(),
            ));
        }
        self.backend.set_credential(Some(credential.clone()));
        Ok(credential)
    }

    /// Like [`require_session`](Self::require_session), and refuse pages the
    /// user's role does not open, before any request is made.
    pub fn require_page(&self, page: Page) -> Result<SessionCredential, BrainbotError> {
        let credential = self.require_session()?;
        if !page.is_allowed(credential.role()) {
            return Err(BrainbotError::Forbidden(format!(
                "{} is not available to role {}",
                page.label(),
                credential.role()
            )));
        }
        Ok(credential)
    }

    /// Convert an API failure, signing out first if the server rejected the
    /// session and the policy says so.
    pub fn fail(&self, err: ApiError) -> BrainbotError {
        let reauthenticate = self.config.auth.on_unauthorized == UnauthorizedPolicy::Reauthenticate;
        if err.is_unauthorized() && reauthenticate {
            if let Err(e) = self.credentials.clear() {
                warn!("failed to clear rejected credential: {e}");
            }
        }
        api_error(err)
    }
}

pub fn api_error(err: ApiError) -> BrainbotError {
    match err {
        ApiError::Unauthorized => {
            BrainbotError::Auth("the server rejected the session, run `brainbot login`".into())
        }
        ApiError::Forbidden(message) => BrainbotError::Forbidden(message),
        ApiError::InvalidInput(message) => BrainbotError::Other(message),
        other => BrainbotError::Api(other.to_string()),
    }
}

fn http_config(config: &BrainbotConfig) -> HttpConfig {
    let api = &config.api;
    HttpConfig::new(api.chat_url.as_str())
        .with_identity_url(api.identity_url.as_str())
        .with_documents_url(api.documents_url.as_str())
        .with_timeouts(
            Duration::from_secs(u64::from(api.connect_timeout_secs)),
            Duration::from_secs(u64::from(api.request_timeout_secs)),
        )
}

fn credentials_path(config: &BrainbotConfig) -> Result<PathBuf, BrainbotError> {
    match &config.auth.credentials_file {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(brainbot_config::app_dir()?.join("session.json")),
    }
}
