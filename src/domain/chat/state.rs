//! Chat state containers — conversation filter and presence set.

use super::wire::SendMessagePayload;
use super::{ChatMessage, OnlineUser};
use crate::shared::UserId;

/// The message sequence of the currently selected conversation.
///
/// Inbound messages are kept when no recipient is selected, or when they come
/// from the selected recipient or the current user. Everything else is
/// dropped, not buffered. Selecting a different recipient clears the sequence.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    current_user: Option<UserId>,
    active_recipient: Option<UserId>,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(current_user: Option<UserId>) -> Self {
        Self {
            current_user,
            ..Self::default()
        }
    }

    pub fn current_user(&self) -> Option<&UserId> {
        self.current_user.as_ref()
    }

    pub fn set_current_user(&mut self, user: Option<UserId>) {
        self.current_user = user;
    }

    pub fn active_recipient(&self) -> Option<&UserId> {
        self.active_recipient.as_ref()
    }

    /// Switch conversation partner. Clears the sequence if the partner changed.
    pub fn select_recipient(&mut self, recipient: Option<UserId>) {
        if self.active_recipient != recipient {
            self.messages.clear();
        }
        self.active_recipient = recipient;
    }

    /// Whether an inbound message belongs in the displayed sequence.
    pub fn accepts(&self, message: &ChatMessage) -> bool {
        match &self.active_recipient {
            None => true,
            Some(recipient) => {
                &message.sender == recipient || self.current_user.as_ref() == Some(&message.sender)
            }
        }
    }

    /// Fold an inbound message. Returns whether it was appended.
    pub fn receive(&mut self, message: ChatMessage) -> bool {
        if self.accepts(&message) {
            self.messages.push(message);
            true
        } else {
            tracing::debug!(sender = %message.sender, "Dropping message outside active conversation");
            false
        }
    }

    /// Compose an outbound message.
    ///
    /// Requires non-blank content, a selected recipient and a current user.
    /// Appends the local copy and returns it with the payload to emit.
    pub fn compose(&mut self, content: &str) -> Option<(ChatMessage, SendMessagePayload)> {
        if content.trim().is_empty() {
            return None;
        }
        let recipient = self.active_recipient.clone()?;
        let sender = self.current_user.clone()?;

        let message = ChatMessage {
            sender,
            content: content.to_string(),
            timestamp: chrono::Utc::now(),
        };
        self.messages.push(message.clone());

        Some((
            message,
            SendMessagePayload {
                recipient_id: recipient,
                content: content.to_string(),
            },
        ))
    }

    /// Whether a message was sent by the current user (right-aligned bubbles).
    pub fn is_own(&self, message: &ChatMessage) -> bool {
        self.current_user.as_ref() == Some(&message.sender)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Set of online users keyed by id, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct OnlineUsers {
    users: Vec<OnlineUser>,
}

impl OnlineUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// A user came online. No-op if the id is already present.
    pub fn user_online(&mut self, id: UserId) {
        if !self.contains(&id) {
            self.users.push(OnlineUser::placeholder(id));
        }
    }

    /// A user went offline.
    pub fn user_offline(&mut self, id: &UserId) {
        self.users.retain(|u| &u.id != id);
    }

    /// Replace the whole set (reply to `getOnlineUsers`). Later duplicates are dropped.
    pub fn replace(&mut self, users: Vec<OnlineUser>) {
        self.users.clear();
        for user in users {
            if !self.contains(&user.id) {
                self.users.push(user);
            }
        }
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.users.iter().any(|u| &u.id == id)
    }

    pub fn users(&self) -> &[OnlineUser] {
        &self.users
    }

    /// Everyone except `me`, for the contact list.
    pub fn others<'a>(&'a self, me: Option<&'a UserId>) -> impl Iterator<Item = &'a OnlineUser> {
        self.users.iter().filter(move |u| Some(&u.id) != me)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }
}
