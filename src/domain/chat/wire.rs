//! Wire types for the chat feed.

use crate::shared::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `receiveMessage` payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessagePayload {
    pub sender: UserId,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "time", deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Entry of the `onlineUsers` list reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OnlineUserPayload {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_online", alias = "online", alias = "isOnline")]
    pub is_online: bool,
}

fn default_online() -> bool {
    true
}

/// `sendMessage` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub recipient_id: UserId,
    pub content: String,
}

/// Accepts RFC 3339 strings or epoch milliseconds; anything else is `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_rfc3339_timestamp() {
        let p: ChatMessagePayload = serde_json::from_str(
            r#"{"sender":"u1","content":"hi","timestamp":"2024-03-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(p.sender.as_str(), "u1");
        assert_eq!(p.timestamp.unwrap().timestamp(), 1_709_287_200);
    }

    #[test]
    fn test_message_with_millis_and_locale_time() {
        let p: ChatMessagePayload =
            serde_json::from_str(r#"{"sender":"u1","content":"hi","timestamp":1709287200000}"#)
                .unwrap();
        assert_eq!(p.timestamp.unwrap().timestamp(), 1_709_287_200);

        let p: ChatMessagePayload =
            serde_json::from_str(r#"{"sender":"u1","content":"hi","time":"10:00:00 AM"}"#)
                .unwrap();
        assert!(p.timestamp.is_none());
    }

    #[test]
    fn test_online_user_aliases() {
        let p: OnlineUserPayload =
            serde_json::from_str(r#"{"_id":"abc","username":"alice","online":false}"#).unwrap();
        assert_eq!(p.id.as_str(), "abc");
        assert!(!p.is_online);

        let p: OnlineUserPayload = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert!(p.is_online);
    }

    #[test]
    fn test_send_payload_is_camel_case() {
        let p = SendMessagePayload {
            recipient_id: UserId::from("u2"),
            content: "yo".into(),
        };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            serde_json::json!({"recipientId": "u2", "content": "yo"})
        );
    }
}
