//! WebSocket connection manager.
//!
//! Owns one logical streaming connection, delivers typed events to the
//! dispatch loop, and re-establishes the transport a bounded number of
//! times after a close or error.

use crate::error::WsError;
use crate::event::{ReadyState, WsEvent};
use crate::handle::{WsHandle, WsOutbound};
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex as TokioMutex};
use tokio_tungstenite::{connect_async_tls_with_config, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// WebSocket URL.
    pub url: String,
    /// Maximum reconnect attempts over the manager's lifetime.
    pub retry_limit: u32,
    /// Fixed delay before each reconnect attempt.
    pub retry_delay_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            retry_limit: 3,
            retry_delay_ms: 5000,
        }
    }
}

/// Why the message loop exited.
enum Disconnect {
    /// Server close frame or stream end.
    Closed,
    /// Transport error, including a failed connect.
    Errored(WsError),
    /// Shutdown requested; no further effects are allowed.
    Shutdown,
}

/// WebSocket connection manager.
///
/// Failures never surface as hard errors from [`run`](Self::run): they
/// are observable only as [`WsEvent`]s and [`ReadyState`] transitions.
/// The reconnect counter is lifetime-monotonic; it is never reset by a
/// successful reconnection, so once the budget is exhausted the manager
/// permanently stops retrying.
pub struct ConnectionManager {
    config: ConnectionConfig,
    state: Arc<RwLock<ReadyState>>,
    last_message: Arc<RwLock<Option<String>>>,
    reconnect_count: Arc<RwLock<u32>>,
    event_tx: mpsc::Sender<WsEvent>,
    /// Outbound sender (for handles).
    outbound_tx: mpsc::Sender<WsOutbound>,
    /// Outbound receiver (consumed by the message loop).
    outbound_rx: Arc<TokioMutex<mpsc::Receiver<WsOutbound>>>,
    /// Cancellation token gating every post-disposal effect.
    shutdown_token: CancellationToken,
}

impl ConnectionManager {
    /// Create a new connection manager delivering events to `event_tx`.
    pub fn new(config: ConnectionConfig, event_tx: mpsc::Sender<WsEvent>) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::channel(100);
        Self {
            config,
            state: Arc::new(RwLock::new(ReadyState::Uninstantiated)),
            last_message: Arc::new(RwLock::new(None)),
            reconnect_count: Arc::new(RwLock::new(0)),
            event_tx,
            outbound_tx,
            outbound_rx: Arc::new(TokioMutex::new(outbound_rx)),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Get a handle for sending and closing.
    ///
    /// The handle can be cloned and shared across tasks.
    pub fn handle(&self) -> WsHandle {
        WsHandle::new(
            self.outbound_tx.clone(),
            self.state.clone(),
            self.last_message.clone(),
        )
    }

    /// Current connection state.
    pub fn state(&self) -> ReadyState {
        *self.state.read()
    }

    /// Reconnect attempts consumed so far.
    pub fn reconnect_count(&self) -> u32 {
        *self.reconnect_count.read()
    }

    /// Signal disposal.
    ///
    /// Cancels the active transport and any pending reconnect sleep. No
    /// state transition or event may fire after this returns.
    pub fn shutdown(&self) {
        info!("connection manager shutdown requested");
        self.shutdown_token.cancel();
    }

    /// Check if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Connect and run the message loop, retrying a bounded number of
    /// times. Returns when the retry budget is exhausted or on shutdown.
    pub async fn run(&self) {
        loop {
            if self.is_shutdown() {
                return;
            }

            self.set_state(ReadyState::Connecting);

            match self.try_connect().await {
                Disconnect::Shutdown => return,
                Disconnect::Closed => {
                    self.set_state(ReadyState::Closed);
                    self.emit(WsEvent::Closed).await;
                }
                Disconnect::Errored(e) => {
                    warn!(error = %e, "transport error");
                    self.set_state(ReadyState::Uninstantiated);
                    self.emit(WsEvent::Errored).await;
                }
            }

            let attempts = *self.reconnect_count.read();
            if attempts >= self.config.retry_limit {
                info!(attempts, "reconnect budget exhausted, not retrying");
                return;
            }

            let delay = Duration::from_millis(self.config.retry_delay_ms);
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = self.shutdown_token.cancelled() => {
                    debug!("shutdown during reconnect delay");
                    return;
                }
            }

            *self.reconnect_count.write() = attempts + 1;
            info!(attempt = attempts + 1, limit = self.config.retry_limit, "reconnecting");
        }
    }

    async fn try_connect(&self) -> Disconnect {
        info!(url = %self.config.url, "connecting to websocket");

        let (ws_stream, _response) =
            match connect_async_tls_with_config(&self.config.url, None, true, None).await {
                Ok(pair) => pair,
                Err(e) => return Disconnect::Errored(e.into()),
            };
        let (mut write, mut read) = ws_stream.split();

        self.set_state(ReadyState::Open);
        self.emit(WsEvent::Opened).await;
        info!("websocket open");

        loop {
            // Lock outbound_rx for the select! block
            let outbound_recv = async { self.outbound_rx.lock().await.recv().await };

            tokio::select! {
                // Disposal: close the transport, emit nothing
                () = self.shutdown_token.cancelled() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Disconnect::Shutdown;
                }

                // Incoming frame
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            // Latest payload only, no history
                            *self.last_message.write() = Some(text.clone());
                            self.emit(WsEvent::Message(text)).await;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            debug!("received ping, sending pong");
                            if let Err(e) = write.send(Message::Pong(data)).await {
                                return Disconnect::Errored(e.into());
                            }
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason) = frame
                                .map(|f| (u16::from(f.code), f.reason.to_string()))
                                .unwrap_or((1000, "normal close".to_string()));
                            warn!(code, %reason, "websocket closed by server");
                            return Disconnect::Closed;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(?e, "websocket read error");
                            return Disconnect::Errored(e.into());
                        }
                        None => {
                            warn!("websocket stream ended");
                            return Disconnect::Closed;
                        }
                    }
                }

                // Outbound request from a handle
                outbound = outbound_recv => {
                    match outbound {
                        Some(WsOutbound::Text(text)) => {
                            if let Err(e) = write.send(Message::Text(text)).await {
                                return Disconnect::Errored(e.into());
                            }
                        }
                        Some(WsOutbound::Close) => {
                            self.set_state(ReadyState::Closing);
                            if let Err(e) = write.send(Message::Close(None)).await {
                                return Disconnect::Errored(e.into());
                            }
                            // Keep reading until the server acknowledges
                        }
                        None => {}
                    }
                }
            }
        }
    }

    /// State write, gated on staleness.
    fn set_state(&self, next: ReadyState) {
        if self.shutdown_token.is_cancelled() {
            return;
        }
        *self.state.write() = next;
    }

    /// Event emit, gated on staleness.
    async fn emit(&self, event: WsEvent) {
        if self.shutdown_token.is_cancelled() {
            return;
        }
        if self.event_tx.send(event).await.is_err() {
            warn!("event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();
        assert_eq!(config.retry_limit, 3);
        assert_eq!(config.retry_delay_ms, 5000);
    }

    #[test]
    fn test_initial_state() {
        let (tx, _rx) = mpsc::channel(16);
        let manager = ConnectionManager::new(ConnectionConfig::default(), tx);
        assert_eq!(manager.state(), ReadyState::Uninstantiated);
        assert_eq!(manager.reconnect_count(), 0);
        assert!(!manager.is_shutdown());
    }
}
