//! Subscription Store — the authoritative live state behind the dashboard.
//!
//! Owns one [`Transport`], folds its events into a [`LiveState`] and exposes
//! read accessors plus a change counter views can wait on. A pump task is
//! the only writer of price and presence state.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──connect()──▶ mounted ──disconnect()──▶ unmounted
//!          ▲  (no-op while mounted)                │
//!          └───────────────────────────────────────┘
//! ```
//!
//! Every connect starts a new generation. The pump checks `mounted` and its
//! generation under the write lock before applying an event, so nothing is
//! applied once `disconnect()` has taken that lock.

pub mod state;

use std::sync::Arc;

use async_lock::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::chat::{ChatMessage, OnlineUser};
use crate::domain::coin::PriceSnapshot;
use crate::error::{SdkError, WsError};
use crate::shared::UserId;
use crate::ws::{MessageOut, Transport, WsEvent};

pub use state::LiveState;

struct Live {
    state: LiveState,
    generation: u64,
    mounted: bool,
}

/// Shared handle to one subscription. Clones observe the same state.
#[derive(Clone)]
pub struct SubscriptionStore {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    live: Arc<RwLock<Live>>,
    pump: Arc<Mutex<Option<JoinHandle<()>>>>,
    changes: Arc<watch::Sender<u64>>,
}

impl SubscriptionStore {
    pub fn new(transport: impl Transport + 'static) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            transport: Arc::new(Mutex::new(Box::new(transport))),
            live: Arc::new(RwLock::new(Live {
                state: LiveState::new(),
                generation: 0,
                mounted: false,
            })),
            pump: Arc::new(Mutex::new(None)),
            changes: Arc::new(changes),
        }
    }

    /// Open the push channel and start applying its events.
    ///
    /// A no-op while already mounted. Failures are returned and leave the
    /// store unmounted; nothing retries.
    pub async fn connect(&self) -> Result<(), SdkError> {
        let mut transport = self.transport.lock().await;
        if self.live.read().await.mounted {
            return Ok(());
        }

        let mut events = transport.connect().await?;

        let generation = {
            let mut live = self.live.write().await;
            live.generation += 1;
            live.mounted = true;
            live.state.clear();
            live.generation
        };

        let live = Arc::clone(&self.live);
        let changes = Arc::clone(&self.changes);
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mut guard = live.write().await;
                if !guard.mounted || guard.generation != generation {
                    tracing::debug!(generation, "Discarding event after teardown");
                    return;
                }
                match event {
                    WsEvent::Message(kind) => guard.state.apply(kind),
                    WsEvent::Connected => tracing::debug!(generation, "Transport connected"),
                    WsEvent::Disconnected { code, reason } => {
                        tracing::info!(?code, %reason, "Push channel lost");
                        guard.mounted = false;
                        drop(guard);
                        changes.send_modify(|n| *n += 1);
                        return;
                    }
                    WsEvent::Error(e) => {
                        tracing::debug!(error = %e, "Ignoring transport error");
                        continue;
                    }
                }
                drop(guard);
                changes.send_modify(|n| *n += 1);
            }
        });
        *self.pump.lock().await = Some(handle);

        tracing::info!(generation, "Subscription store connected");
        Ok(())
    }

    /// Tear down. No event is applied after this returns.
    pub async fn disconnect(&self) -> Result<(), SdkError> {
        let mut transport = self.transport.lock().await;
        {
            let mut live = self.live.write().await;
            live.mounted = false;
            live.state.clear();
        }
        if let Some(handle) = self.pump.lock().await.take() {
            handle.abort();
        }
        transport.disconnect().await?;
        self.changes.send_modify(|n| *n += 1);
        tracing::info!("Subscription store disconnected");
        Ok(())
    }

    /// Mounted and the transport still up. `live` is released before the
    /// transport lock is taken.
    pub async fn is_connected(&self) -> bool {
        let mounted = self.live.read().await.mounted;
        mounted && self.transport.lock().await.is_connected()
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Current price snapshot. Cheap to clone and immutable.
    pub async fn snapshot(&self) -> Arc<PriceSnapshot> {
        self.live.read().await.state.prices()
    }

    /// True until the first price update of this subscription.
    pub async fn is_loading(&self) -> bool {
        self.live.read().await.state.is_loading()
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.live.read().await.state.conversation().messages().to_vec()
    }

    pub async fn online_users(&self) -> Vec<OnlineUser> {
        self.live.read().await.state.online().users().to_vec()
    }

    /// Online users other than the current user.
    pub async fn contacts(&self) -> Vec<OnlineUser> {
        let live = self.live.read().await;
        let me = live.state.conversation().current_user();
        live.state.online().others(me).cloned().collect()
    }

    /// Counter bumped after every applied change.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    // ── Conversation controls ────────────────────────────────────────────

    pub async fn set_current_user(&self, user: Option<UserId>) {
        self.live
            .write()
            .await
            .state
            .conversation
            .set_current_user(user);
    }

    /// Switch chat partner. The message list clears if the partner changed.
    pub async fn select_recipient(&self, recipient: Option<UserId>) {
        self.live
            .write()
            .await
            .state
            .conversation
            .select_recipient(recipient);
        self.changes.send_modify(|n| *n += 1);
    }

    /// Send `content` to the selected recipient.
    ///
    /// Returns `Ok(None)` without sending when the content is blank or no
    /// recipient or current user is set. The local copy is appended before
    /// the frame is queued.
    pub async fn send_message(&self, content: &str) -> Result<Option<ChatMessage>, SdkError> {
        let composed = {
            let mut live = self.live.write().await;
            if !live.mounted {
                return Err(WsError::NotConnected.into());
            }
            live.state.conversation.compose(content)
        };
        let Some((message, payload)) = composed else {
            return Ok(None);
        };
        self.changes.send_modify(|n| *n += 1);

        self.transport
            .lock()
            .await
            .send(MessageOut::SendMessage(payload))?;
        Ok(Some(message))
    }

    /// Ask the server for the full online list.
    pub async fn request_online_users(&self) -> Result<(), SdkError> {
        if !self.live.read().await.mounted {
            return Err(WsError::NotConnected.into());
        }
        self.transport.lock().await.send(MessageOut::GetOnlineUsers)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ChannelTransport;
    use super::*;
    use crate::domain::chat::wire::ChatMessagePayload;
    use crate::domain::coin::wire::CoinPayload;
    use crate::shared::CoinId;
    use crate::ws::Kind;
    use std::time::Duration;

    fn prices(ids: &[&str]) -> WsEvent {
        WsEvent::Message(Kind::UpdatePrices(
            ids.iter()
                .map(|id| CoinPayload {
                    id: CoinId::from(*id),
                    ..CoinPayload::default()
                })
                .collect(),
        ))
    }

    async fn wait_for_change(rx: &mut watch::Receiver<u64>) {
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("no change within 2s")
            .unwrap();
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        store.connect().await.unwrap();
        store.connect().await.unwrap();
        assert_eq!(*transport.connects.lock().unwrap(), 1);
        assert!(store.is_connected().await);
    }

    #[tokio::test]
    async fn test_price_updates_replace_snapshot() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        let mut changes = store.changes();
        store.connect().await.unwrap();
        assert!(store.is_loading().await);

        transport.sender().send(prices(&["a", "b", "c"])).await.unwrap();
        wait_for_change(&mut changes).await;
        assert!(!store.is_loading().await);
        assert_eq!(store.snapshot().await.len(), 3);

        transport.sender().send(prices(&["z"])).await.unwrap();
        wait_for_change(&mut changes).await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.coins()[0].id.as_str(), "z");
    }

    #[tokio::test]
    async fn test_no_events_after_disconnect() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        store.connect().await.unwrap();
        let stale = transport.sender();

        store.disconnect().await.unwrap();
        let _ = stale.send(prices(&["late"])).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.snapshot().await.is_empty());
        assert!(!store.is_connected().await);
    }

    #[tokio::test]
    async fn test_reconnect_discards_previous_generation() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        let mut changes = store.changes();

        store.connect().await.unwrap();
        let old = transport.sender();
        store.disconnect().await.unwrap();
        store.connect().await.unwrap();
        assert_eq!(*transport.connects.lock().unwrap(), 2);

        let _ = old.send(prices(&["old"])).await;
        transport.sender().send(prices(&["new"])).await.unwrap();
        wait_for_change(&mut changes).await;
        while store.snapshot().await.is_empty() {
            wait_for_change(&mut changes).await;
        }
        assert_eq!(store.snapshot().await.coins()[0].id.as_str(), "new");
    }

    #[tokio::test]
    async fn test_chat_filter_and_send() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        let mut changes = store.changes();
        store.set_current_user(Some(UserId::from("me"))).await;
        store.connect().await.unwrap();
        store.select_recipient(Some(UserId::from("alice"))).await;

        for sender in ["bob", "alice"] {
            transport
                .sender()
                .send(WsEvent::Message(Kind::ReceiveMessage(ChatMessagePayload {
                    sender: UserId::from(sender),
                    content: format!("from {sender}"),
                    timestamp: None,
                })))
                .await
                .unwrap();
        }
        while store.messages().await.is_empty() {
            wait_for_change(&mut changes).await;
        }
        let messages = store.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender.as_str(), "alice");

        let sent = store.send_message("hello").await.unwrap().unwrap();
        assert_eq!(sent.sender.as_str(), "me");
        assert_eq!(store.messages().await.len(), 2);
        assert!(matches!(
            transport.sent.lock().unwrap().as_slice(),
            [MessageOut::SendMessage(p)] if p.recipient_id.as_str() == "alice"
        ));

        assert!(store.send_message("   ").await.unwrap().is_none());

        store.select_recipient(Some(UserId::from("bob"))).await;
        assert!(store.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_requires_connection() {
        let store = SubscriptionStore::new(ChannelTransport::default());
        store.set_current_user(Some(UserId::from("me"))).await;
        store.select_recipient(Some(UserId::from("alice"))).await;
        assert!(store.send_message("hi").await.is_err());
        assert!(store.request_online_users().await.is_err());
    }

    #[tokio::test]
    async fn test_server_drop_unmounts() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        let mut changes = store.changes();
        store.connect().await.unwrap();

        transport
            .sender()
            .send(WsEvent::Disconnected {
                code: Some(1001),
                reason: "going away".into(),
            })
            .await
            .unwrap();
        wait_for_change(&mut changes).await;
        assert!(!store.is_connected().await);

        store.connect().await.unwrap();
        assert_eq!(*transport.connects.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_contacts_exclude_current_user() {
        let transport = ChannelTransport::default();
        let store = SubscriptionStore::new(transport.clone());
        let mut changes = store.changes();
        store.set_current_user(Some(UserId::from("me"))).await;
        store.connect().await.unwrap();
        store.request_online_users().await.unwrap();

        for id in ["me", "you"] {
            transport
                .sender()
                .send(WsEvent::Message(Kind::UserOnline(UserId::from(id))))
                .await
                .unwrap();
        }
        while store.online_users().await.len() < 2 {
            wait_for_change(&mut changes).await;
        }
        let contacts = store.contacts().await;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id.as_str(), "you");
        assert!(matches!(
            transport.sent.lock().unwrap().as_slice(),
            [MessageOut::GetOnlineUsers]
        ));
    }

    /// Transport whose handshake takes a while.
    struct SlowTransport(ChannelTransport);

    #[async_trait::async_trait]
    impl Transport for SlowTransport {
        async fn connect(&mut self) -> Result<tokio::sync::mpsc::Receiver<WsEvent>, WsError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.0.connect().await
        }

        fn send(&self, msg: MessageOut) -> Result<(), WsError> {
            self.0.send(msg)
        }

        async fn disconnect(&mut self) -> Result<(), WsError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.0.disconnect().await
        }

        fn is_connected(&self) -> bool {
            self.0.is_connected()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_is_connected_while_connecting_and_disconnecting() {
        let store = SubscriptionStore::new(SlowTransport(ChannelTransport::default()));

        let connecting = tokio::spawn({
            let store = store.clone();
            async move { store.connect().await }
        });
        let polled = tokio::time::timeout(Duration::from_secs(2), async {
            while !store.is_connected().await {
                tokio::task::yield_now().await;
            }
        })
        .await;
        assert!(polled.is_ok(), "is_connected stalled during connect");
        connecting.await.unwrap().unwrap();

        let disconnecting = tokio::spawn({
            let store = store.clone();
            async move { store.disconnect().await }
        });
        let polled = tokio::time::timeout(Duration::from_secs(2), async {
            while store.is_connected().await {
                tokio::task::yield_now().await;
            }
        })
        .await;
        assert!(polled.is_ok(), "is_connected stalled during disconnect");
        disconnecting.await.unwrap().unwrap();
    }
}
