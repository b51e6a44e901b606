//! Admin console model: user records, filtering, and form validation.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Role;
use crate::models::timestamp;
use crate::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Pending,
}

impl AccountStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(AccountStatus::Active),
            "inactive" | "locked" => Some(AccountStatus::Inactive),
            "pending" => Some(AccountStatus::Pending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub last_active: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Lock flag to send when the admin toggles this user.
    pub fn toggled_lock(&self) -> bool {
        self.status == AccountStatus::Active
    }

    fn from_raw(raw: &Value, index: usize) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
        let id = text("_id")
            .or_else(|| text("id"))
            .or_else(|| raw.get("id").and_then(Value::as_i64).map(|n| n.to_string()))
            .unwrap_or_else(|| index.to_string());
        let locked = raw
            .get("isLocked")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self {
            id,
            name: text("name")
                .or_else(|| text("userName"))
                .unwrap_or_else(|| "No Name".into()),
            email: text("email").unwrap_or_else(|| "No Email".into()),
            role: text("role").map(|r| Role::from_claim(&r)).unwrap_or_default(),
            status: if locked {
                AccountStatus::Inactive
            } else {
                AccountStatus::Active
            },
            last_active: text("created_at")
                .or_else(|| text("createdAt"))
                .and_then(|t| timestamp::parse(&t)),
        }
    }
}

/// Parse the user list in any of the shapes the identity service returns:
/// a bare array, `{ "users": [...] }`, or `{ "success": true, "data": [...] }`.
pub fn parse_user_list(body: &Value) -> Result<Vec<UserRecord>, ApiError> {
    let items = body
        .as_array()
        .or_else(|| body.get("users").and_then(Value::as_array))
        .or_else(|| {
            let ok = body.get("success").and_then(Value::as_bool).unwrap_or(false);
            if ok {
                body.get("data").and_then(Value::as_array)
            } else {
                None
            }
        })
        .ok_or_else(|| ApiError::Parse("Unexpected response format from backend".into()))?;

    Ok(items
        .iter()
        .enumerate()
        .map(|(i, raw)| UserRecord::from_raw(raw, i))
        .collect())
}

/// Search and facet filters for the user table.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &UserRecord) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = user.name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle);
        let matches_role = self.role.map_or(true, |r| r == user.role);
        let matches_status = self.status.map_or(true, |s| s == user.status);
        matches_search && matches_role && matches_status
    }

    pub fn apply<'a>(&self, users: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern must compile")
    })
}

/// Body of the "add user" form; the server emails a verification link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("Name is required".into()));
        }
        if !email_pattern().is_match(self.email.trim()) {
            return Err(ApiError::InvalidInput(format!(
                "Invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEdit {
    #[serde(skip)]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}
