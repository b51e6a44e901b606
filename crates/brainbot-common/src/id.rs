use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder id held by the selection while a conversation is being provisioned.
const TEMPORARY_ID: &str = "temp";

pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Opaque, server-assigned conversation identifier.
///
/// Servers hand these out as strings or integers; both deserialize into the
/// same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct ConversationId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for ConversationId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The sentinel used before the server has assigned a real id.
    pub fn temporary() -> Self {
        Self(TEMPORARY_ID.to_string())
    }

    pub fn is_temporary(&self) -> bool {
        self.0.is_empty() || self.0 == TEMPORARY_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
