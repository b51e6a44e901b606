//! Server-issued role claims and role-gated navigation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Role claim carried by the login response.
///
/// The client trusts the claim as issued; unknown claims get the least
/// privileged role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    User,
}

impl Role {
    pub fn from_claim(claim: &str) -> Self {
        match claim.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" => Role::Admin,
            "moderator" => Role::Moderator,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let claim = Option::<String>::deserialize(deserializer)?;
        Ok(claim.as_deref().map(Role::from_claim).unwrap_or_default())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level areas of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Chat,
    Documents,
    Settings,
    UserManagement,
    Evaluations,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Chat,
        Page::Documents,
        Page::Settings,
        Page::UserManagement,
        Page::Evaluations,
    ];

    pub fn is_allowed(&self, role: Role) -> bool {
        match self {
            Page::UserManagement | Page::Evaluations => role.is_admin(),
            Page::Chat | Page::Documents | Page::Settings => true,
        }
    }

    /// Pages visible to `role`, in navigation order.
    pub fn visible_to(role: Role) -> Vec<Page> {
        Self::ALL.into_iter().filter(|p| p.is_allowed(role)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Chat => "Chat",
            Page::Documents => "Documents",
            Page::Settings => "Settings",
            Page::UserManagement => "User Management",
            Page::Evaluations => "Evaluations",
        }
    }
}
