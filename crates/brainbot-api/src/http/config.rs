//! HTTP backend configuration.

use std::time::Duration;

/// Base URLs and timeouts for the HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub chat_url: String,
    pub identity_url: String,
    pub documents_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl HttpConfig {
    /// All three services on one host.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            chat_url: base.clone(),
            identity_url: base.clone(),
            documents_url: base,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into();
        self
    }

    pub fn with_documents_url(mut self, url: impl Into<String>) -> Self {
        self.documents_url = url.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}
