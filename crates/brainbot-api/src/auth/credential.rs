//! The session credential issued at login.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;
use crate::models::timestamp;

/// The signed-in user as described by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "username", alias = "name")]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl CurrentUser {
    /// Up to two upper-case initials for avatars.
    pub fn initials(&self) -> String {
        self.user_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Body of a successful `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub current_user: CurrentUser,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// An opaque bearer credential with an explicit expiry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub token: String,
    pub user: CurrentUser,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SessionCredential {
    /// Build a credential from a login response.
    ///
    /// A server-provided `expiresAt` wins; otherwise the credential lives for
    /// `default_ttl` from `issued_at`.
    pub fn from_login(
        response: LoginResponse,
        issued_at: DateTime<Utc>,
        default_ttl: Duration,
    ) -> Self {
        let fallback = chrono::Duration::from_std(default_ttl)
            .ok()
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .unwrap_or(issued_at);
        let expires_at = response
            .expires_at
            .as_deref()
            .and_then(timestamp::parse)
            .unwrap_or(fallback);

        Self {
            token: response.token,
            user: response.current_user,
            expires_at,
        }
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && now < self.expires_at
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn login_json(expires: Option<&str>) -> LoginResponse {
        let mut body = serde_json::json!({
            "token": "tok-123",
            "currentUser": {
                "id": "u1",
                "userName": "Ada Lovelace",
                "email": "ada@example.com",
                "role": "Admin"
            }
        });
        if let Some(e) = expires {
            body["expiresAt"] = serde_json::json!(e);
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn login_response_parses_current_user() {
        let resp = login_json(None);
        assert_eq!(resp.token, "tok-123");
        assert_eq!(resp.current_user.user_name, "Ada Lovelace");
        assert_eq!(resp.current_user.role, Role::Admin);
    }

    #[test]
    fn expiry_falls_back_to_ttl() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let cred = SessionCredential::from_login(login_json(None), issued, Duration::from_secs(3600));
        assert_eq!(
            cred.expires_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap()
        );
    }

    #[test]
    fn server_expiry_wins() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let cred = SessionCredential::from_login(
            login_json(Some("2024-01-01T12:30:00Z")),
            issued,
            Duration::from_secs(3600),
        );
        assert_eq!(
            cred.expires_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn validity_is_strictly_before_expiry() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let cred = SessionCredential::from_login(login_json(None), issued, Duration::from_secs(60));
        assert!(cred.is_valid(issued));
        assert!(!cred.is_valid(cred.expires_at));
        assert!(!cred.is_valid(cred.expires_at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn debug_redacts_token() {
        let cred = SessionCredential::from_login(login_json(None), Utc::now(), Duration::from_secs(60));
        let dbg = format!("{cred:?}");
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains("tok-123"));
    }

    #[test]
    fn initials_take_first_two_words() {
        let user = login_json(None).current_user;
        assert_eq!(user.initials(), "AL");
    }
}
