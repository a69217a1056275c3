//! Push channel — frames, events and the transport seam.
//!
//! Frames are JSON text of the form `{"event": <name>, "data": <payload>}`.
//! The native transport (`ws-native` feature) runs over `tokio-tungstenite`;
//! anything implementing [`Transport`] can drive a `SubscriptionStore`.

#[cfg(feature = "ws-native")]
pub mod native;

use crate::domain::chat::wire::{ChatMessagePayload, OnlineUserPayload, SendMessagePayload};
use crate::domain::coin::wire::CoinPayload;
use crate::error::WsError;
use crate::shared::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ─── Outbound messages ───────────────────────────────────────────────────────

/// Frames sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum MessageOut {
    #[serde(rename = "sendMessage")]
    SendMessage(SendMessagePayload),
    #[serde(rename = "getOnlineUsers")]
    GetOnlineUsers,
}

// ─── Inbound messages ────────────────────────────────────────────────────────

/// Raw inbound frame from the server.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageIn {
    #[serde(flatten)]
    pub kind: Kind,
}

/// The type of inbound frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum Kind {
    #[serde(rename = "updatePrices")]
    UpdatePrices(Vec<CoinPayload>),
    #[serde(rename = "receiveMessage")]
    ReceiveMessage(ChatMessagePayload),
    #[serde(rename = "userOnline")]
    UserOnline(UserId),
    #[serde(rename = "userOffline")]
    UserOffline(UserId),
    #[serde(rename = "onlineUsers")]
    OnlineUsers(Vec<OnlineUserPayload>),
}

// ─── WsEvent ─────────────────────────────────────────────────────────────────

/// High-level events emitted by a transport to its consumer.
#[derive(Debug, Clone)]
pub enum WsEvent {
    /// A parsed frame from the server.
    Message(Kind),
    Connected,
    /// Connection lost. There is no reconnect.
    Disconnected { code: Option<u16>, reason: String },
    /// An undecodable frame or protocol error.
    Error(String),
}

/// Configuration for the WS transport.
#[derive(Debug, Clone)]
pub struct WsConfig {
    pub url: String,
    pub connect_timeout_ms: u64,
    /// Capacity of the event channel handed to the consumer.
    pub event_buffer: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
            connect_timeout_ms: 10_000,
            event_buffer: 256,
        }
    }
}

// ─── Transport ───────────────────────────────────────────────────────────────

/// One push-update connection.
///
/// `connect` opens the channel and returns the receiving end of its event
/// stream; the stream ends when the connection closes. `send` queues a frame
/// without waiting for the socket.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn connect(&mut self) -> Result<mpsc::Receiver<WsEvent>, WsError>;

    fn send(&self, msg: MessageOut) -> Result<(), WsError>;

    async fn disconnect(&mut self) -> Result<(), WsError>;

    fn is_connected(&self) -> bool;
}

/// Decode one text frame.
pub fn decode(text: &str) -> Result<Kind, WsError> {
    serde_json::from_str::<MessageIn>(text)
        .map(|m| m.kind)
        .map_err(|e| WsError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_update_prices() {
        let kind = decode(
            r#"{"event":"updatePrices","data":[{"id":"bitcoin","symbol":"btc","current_price":51234.78}]}"#,
        )
        .unwrap();
        match kind {
            Kind::UpdatePrices(coins) => {
                assert_eq!(coins.len(), 1);
                assert_eq!(coins[0].id.as_str(), "bitcoin");
                assert_eq!(coins[0].market_cap, 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decode_presence() {
        assert!(matches!(
            decode(r#"{"event":"userOnline","data":"u1"}"#).unwrap(),
            Kind::UserOnline(id) if id.as_str() == "u1"
        ));
        assert!(matches!(
            decode(r#"{"event":"userOffline","data":"u1"}"#).unwrap(),
            Kind::UserOffline(_)
        ));
    }

    #[test]
    fn test_decode_receive_message() {
        let kind = decode(
            r#"{"event":"receiveMessage","data":{"sender":"u2","content":"gm","timestamp":"2024-05-01T12:00:00Z"}}"#,
        )
        .unwrap();
        assert!(matches!(kind, Kind::ReceiveMessage(m) if m.content == "gm"));
    }

    #[test]
    fn test_decode_rejects_unknown_event() {
        assert!(matches!(
            decode(r#"{"event":"mystery","data":{}}"#),
            Err(WsError::DeserializationError(_))
        ));
        assert!(decode("not json").is_err());
    }

    #[test]
    fn test_outbound_frames() {
        let send = MessageOut::SendMessage(SendMessagePayload {
            recipient_id: UserId::from("u2"),
            content: "hi".into(),
        });
        assert_eq!(
            serde_json::to_value(&send).unwrap(),
            serde_json::json!({"event":"sendMessage","data":{"recipientId":"u2","content":"hi"}})
        );
        assert_eq!(
            serde_json::to_value(MessageOut::GetOnlineUsers).unwrap(),
            serde_json::json!({"event":"getOnlineUsers"})
        );
    }
}
