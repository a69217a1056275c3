//! Live state folded from push-channel events.

use std::sync::Arc;

use crate::domain::chat::{ChatMessage, Conversation, OnlineUser, OnlineUsers};
use crate::domain::coin::{Coin, PriceSnapshot};
use crate::ws::Kind;

/// Everything one subscription knows: prices, the open conversation and
/// who is online.
#[derive(Debug, Clone)]
pub struct LiveState {
    prices: Arc<PriceSnapshot>,
    loading: bool,
    pub(crate) conversation: Conversation,
    pub(crate) online: OnlineUsers,
    next_version: u64,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            prices: Arc::new(PriceSnapshot::default()),
            loading: true,
            conversation: Conversation::default(),
            online: OnlineUsers::default(),
            next_version: 1,
        }
    }
}

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one inbound frame.
    pub fn apply(&mut self, kind: Kind) {
        match kind {
            Kind::UpdatePrices(coins) => {
                self.on_price_update(coins.into_iter().map(Coin::from).collect())
            }
            Kind::ReceiveMessage(payload) => {
                self.on_chat_message(ChatMessage::from(payload));
            }
            Kind::UserOnline(id) => self.online.user_online(id),
            Kind::UserOffline(id) => self.online.user_offline(&id),
            Kind::OnlineUsers(users) => self
                .online
                .replace(users.into_iter().map(OnlineUser::from).collect()),
        }
    }

    /// Replace the snapshot in full and clear the loading flag.
    pub fn on_price_update(&mut self, coins: Vec<Coin>) {
        let version = self.next_version;
        self.next_version += 1;
        self.prices = Arc::new(PriceSnapshot::new(version, coins));
        self.loading = false;
    }

    /// Append if the message belongs to the open conversation.
    pub fn on_chat_message(&mut self, message: ChatMessage) -> bool {
        self.conversation.receive(message)
    }

    pub fn prices(&self) -> Arc<PriceSnapshot> {
        Arc::clone(&self.prices)
    }

    /// True until the first price update arrives.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn online(&self) -> &OnlineUsers {
        &self.online
    }

    /// Back to the pre-connect state. The current user survives, versions
    /// keep counting so caches never confuse two subscriptions.
    pub fn clear(&mut self) {
        let current_user = self.conversation.current_user().cloned();
        let next_version = self.next_version;
        *self = Self {
            conversation: Conversation::new(current_user),
            next_version,
            ..Self::default()
        };
    }
}
