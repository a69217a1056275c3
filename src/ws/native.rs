//! Native push-channel transport — `tokio-tungstenite`.
//!
//! `connect` dials the socket (bounded by `connect_timeout_ms`) and hands the
//! open connection to a background task. The task forwards decoded frames as
//! [`WsEvent`]s and writes queued outbound frames. One connection per
//! `connect`; a dropped connection is reported and not re-established.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::WsError;
use crate::ws::{decode, MessageOut, Transport, WsConfig, WsEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum Command {
    Send(MessageOut),
    Disconnect,
}

/// Native WebSocket transport.
pub struct WsClient {
    config: WsConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    task_handle: Option<JoinHandle<()>>,
    connected: Arc<AtomicBool>,
}

impl WsClient {
    /// Create a new client. Does not connect yet.
    pub fn new(config: WsConfig) -> Self {
        Self {
            config,
            cmd_tx: None,
            task_handle: None,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &WsConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for WsClient {
    async fn connect(&mut self) -> Result<mpsc::Receiver<WsEvent>, WsError> {
        if self.is_connected() {
            return Err(WsError::ConnectionFailed("Already connected".into()));
        }

        let timeout = Duration::from_millis(self.config.connect_timeout_ms);
        let (ws_stream, _) = tokio::time::timeout(timeout, connect_async(self.config.url.as_str()))
            .await
            .map_err(|_| WsError::ConnectionFailed("Connection timeout".into()))?
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;
        let (sink, stream) = ws_stream.split();

        let (event_tx, event_rx) = mpsc::channel(self.config.event_buffer.max(1));
        let (cmd_tx, cmd_rx) = mpsc::channel(64);

        self.connected.store(true, Ordering::SeqCst);
        tracing::info!(url = %self.config.url, "Push channel connected");
        let _ = event_tx.send(WsEvent::Connected).await;

        let connected = Arc::clone(&self.connected);
        self.task_handle = Some(tokio::spawn(async move {
            run_connected(sink, stream, event_tx, cmd_rx).await;
            connected.store(false, Ordering::SeqCst);
        }));
        self.cmd_tx = Some(cmd_tx);

        Ok(event_rx)
    }

    /// Queue a frame for the background task.
    fn send(&self, msg: MessageOut) -> Result<(), WsError> {
        match &self.cmd_tx {
            Some(tx) => tx.try_send(Command::Send(msg)).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    WsError::SendFailed("Command channel full".into())
                }
                mpsc::error::TrySendError::Closed(_) => WsError::NotConnected,
            }),
            None => Err(WsError::NotConnected),
        }
    }

    /// Close gracefully and wait for the background task to finish.
    async fn disconnect(&mut self) -> Result<(), WsError> {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Disconnect).await;
        }

        if let Some(handle) = self.task_handle.take() {
            if tokio::time::timeout(Duration::from_secs(5), handle).await.is_err() {
                tracing::warn!("Push channel task did not stop in time");
            }
        }

        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

/// Runs until the socket closes, the client disconnects, or the consumer
/// drops its event receiver.
async fn run_connected(
    mut sink: SplitSink<WsStream, Message>,
    mut stream: SplitStream<WsStream>,
    event_tx: mpsc::Sender<WsEvent>,
    mut cmd_rx: mpsc::Receiver<Command>,
) {
    loop {
        tokio::select! {
            msg = stream.next() => {
                let event = match msg {
                    Some(Ok(Message::Text(text))) => match decode(text.as_str()) {
                        Ok(kind) => WsEvent::Message(kind),
                        Err(e) => {
                            tracing::warn!(raw = %text.as_str(), "Undecodable frame: {}", e);
                            WsEvent::Error(e.to_string())
                        }
                    },
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                        continue;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = extract_close(frame.as_ref());
                        tracing::info!(code, %reason, "Push channel closed by server");
                        let _ = event_tx
                            .send(WsEvent::Disconnected { code: Some(code), reason })
                            .await;
                        return;
                    }
                    // Binary, Pong, raw frames
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::error!("Push channel error: {}", e);
                        let _ = event_tx
                            .send(WsEvent::Disconnected { code: None, reason: e.to_string() })
                            .await;
                        return;
                    }
                    None => {
                        let _ = event_tx
                            .send(WsEvent::Disconnected { code: None, reason: "Stream ended".into() })
                            .await;
                        return;
                    }
                };

                if event_tx.send(event).await.is_err() {
                    tracing::debug!("Event receiver dropped, closing push channel");
                    let _ = sink.close().await;
                    return;
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Command::Send(msg_out)) => {
                        if let Err(e) = send_msg(&mut sink, &msg_out).await {
                            tracing::warn!("Send failed: {}", e);
                        }
                    }
                    Some(Command::Disconnect) | None => {
                        let _ = sink.send(Message::Close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "Client disconnect".into(),
                        }))).await;
                        tracing::info!("Push channel disconnected");
                        return;
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

async fn send_msg(
    sink: &mut SplitSink<WsStream, Message>,
    msg: &MessageOut,
) -> Result<(), String> {
    let json = serde_json::to_string(msg).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json.into()))
        .await
        .map_err(|e| e.to_string())
}

fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}
