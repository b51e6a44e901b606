//! Authentication and session credential settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the client does when a backend answers 401.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum UnauthorizedPolicy {
    /// Drop the stored credential and ask the user to sign in again.
    #[default]
    Reauthenticate,
    /// Log the failure and carry on with the generic error path.
    PassThrough,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime given to a credential when the server does not send one
    /// (valid range: 60-604800).
    pub session_ttl_secs: u32,
    /// Overrides the default credential file location.
    pub credentials_file: Option<String>,
    pub on_unauthorized: UnauthorizedPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 3600,
            credentials_file: None,
            on_unauthorized: UnauthorizedPolicy::Reauthenticate,
        }
    }
}

impl AuthConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.session_ttl_secs))
    }
}
