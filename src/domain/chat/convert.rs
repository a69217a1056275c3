//! Conversions from wire types to domain types for chat.

use super::wire::{ChatMessagePayload, OnlineUserPayload};
use super::{ChatMessage, OnlineUser};

impl From<ChatMessagePayload> for ChatMessage {
    fn from(p: ChatMessagePayload) -> Self {
        Self {
            sender: p.sender,
            content: p.content,
            timestamp: p.timestamp.unwrap_or_else(chrono::Utc::now),
        }
    }
}

impl From<OnlineUserPayload> for OnlineUser {
    fn from(p: OnlineUserPayload) -> Self {
        if p.username.is_empty() {
            return OnlineUser {
                is_online: p.is_online,
                ..OnlineUser::placeholder(p.id)
            };
        }
        Self {
            id: p.id,
            username: p.username,
            is_online: p.is_online,
        }
    }
}
