//! HTTP backend struct, URL building, auth headers, and status mapping.

use std::sync::RwLock;

use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::HttpConfig;
use crate::auth::SessionCredential;
use crate::ApiError;

/// HTTP client for the chat, identity, and document services.
pub struct HttpBackend {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
    credential: RwLock<Option<SessionCredential>>,
}

impl HttpBackend {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http,
            credential: RwLock::new(None),
        })
    }

    pub fn with_credential(self, credential: Option<SessionCredential>) -> Self {
        self.set_credential(credential);
        self
    }

    /// Install (or remove) the credential attached to subsequent requests.
    pub fn set_credential(&self, credential: Option<SessionCredential>) {
        if let Ok(mut slot) = self.credential.write() {
            *slot = credential;
        }
    }

    pub fn credential(&self) -> Option<SessionCredential> {
        self.credential.read().ok().and_then(|slot| slot.clone())
    }

    /// The bearer token, only while the credential is still valid.
    pub(crate) fn bearer(&self) -> Option<String> {
        let slot = self.credential.read().ok()?;
        slot.as_ref()
            .filter(|c| c.is_valid(Utc::now()))
            .map(|c| c.token.clone())
    }

    /// Join path segments onto a base URL, percent-encoding each segment.
    pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(base)
            .map_err(|e| ApiError::InvalidInput(format!("invalid base URL {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidInput(format!("base URL cannot take a path: {base}")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, path = url.path(), "backend request");
        let builder = self.http.request(method, url);
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map any non-2xx status to an `ApiError`.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = status_error(status, &body);
        warn!(status = status.as_u16(), "backend request failed: {err}");
        Err(err)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Send, then pull a human-readable `message` out of the reply if present.
    pub(crate) async fn send_for_message(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let text = self
            .send(builder)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| message_of(&v))
            .unwrap_or_default())
    }
}

pub(crate) fn message_of(body: &Value) -> Option<String> {
    ["message", "title", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Map a failed status and its body to the error taxonomy.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ApiError {
    let json = serde_json::from_str::<Value>(body).ok();
    let message = json
        .as_ref()
        .and_then(message_of)
        .unwrap_or_else(|| body.chars().take(200).collect());
    let locked = json
        .as_ref()
        .and_then(|v| v.get("errorType"))
        .and_then(Value::as_str)
        == Some("ACCOUNT_LOCKED");

    match status {
        _ if locked => ApiError::AccountLocked,
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Http {
            status: status.as_u16(),
            message,
        },
    }
}
