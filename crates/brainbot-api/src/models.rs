//! Wire models for the chat service.

use brainbot_common::ConversationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sidebar entry for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        rename = "createdAt",
        alias = "created_at",
        deserialize_with = "timestamp::deserialize"
    )]
    pub created_at: DateTime<Utc>,
}

/// One prompt/response round trip as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub prompt: String,
    pub response: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteReply {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendMessageBody<'a> {
    pub prompt: &'a str,
}

pub(crate) mod timestamp {
    //! RFC 3339 timestamps, with offset-less values read as UTC.

    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn conversation_accepts_camel_case_created_at() {
        let json = r#"{"id":"c1","title":"Billing","createdAt":"2024-05-01T10:00:00Z"}"#;
        let conv: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(conv.id.as_str(), "c1");
        assert_eq!(conv.title.as_deref(), Some("Billing"));
        assert_eq!(
            conv.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn conversation_accepts_snake_case_and_null_title() {
        let json = r#"{"id":7,"title":null,"created_at":"2024-05-01T10:00:00.123"}"#;
        let conv: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(conv.id.as_str(), "7");
        assert!(conv.title.is_none());
    }

    #[test]
    fn exchange_with_offset_is_normalised_to_utc() {
        let json = r#"{"prompt":"Hi","response":"Hello","timestamp":"2024-05-01T12:00:00+02:00"}"#;
        let ex: Exchange = serde_json::from_str(json).unwrap();
        assert_eq!(
            ex.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let json = r#"{"prompt":"Hi","response":"Hello","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<Exchange>(json).is_err());
    }

    #[test]
    fn delete_reply_tolerates_missing_message() {
        let reply: DeleteReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.message, "");
    }
}
