//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where the client finds its backends.
///
/// The chat service and the identity/user service are deployed separately;
/// documents live on the identity host by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub chat_url: String,
    pub identity_url: String,
    pub documents_url: String,
    /// Connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub request_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            chat_url: "http://localhost:8000".into(),
            identity_url: "http://localhost:3000".into(),
            documents_url: "http://localhost:3000".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}
