//! Chat domain — direct messages and online presence.

mod convert;
pub mod state;
pub mod wire;

use crate::shared::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use state::{Conversation, OnlineUsers};

/// A single chat message, inbound or locally composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A user visible in the presence list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUser {
    pub id: UserId,
    pub username: String,
    pub is_online: bool,
}

impl OnlineUser {
    /// Placeholder entry for an id announced by a presence event.
    pub fn placeholder(id: UserId) -> Self {
        let username = format!("User-{}", id.short());
        Self {
            id,
            username,
            is_online: true,
        }
    }

    /// First letter of the username, upper-cased, for avatar badges.
    pub fn initial(&self) -> Option<char> {
        self.username.chars().next().map(|c| c.to_ascii_uppercase())
    }
}
