//! Cloneable handle onto a running connection.
//!
//! Provides a channel-based API that is reconnect-safe and avoids
//! lifetime issues with direct WebSocket access.

use crate::event::ReadyState;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Outbound request to the connection's message loop.
#[derive(Debug)]
pub enum WsOutbound {
    /// Plain text frame.
    Text(String),
    /// Request a transport close.
    Close,
}

/// Handle for interacting with a running [`ConnectionManager`].
///
/// `send` and `close` only act while the connection is open; otherwise
/// they are silent no-ops. Transport failures are never surfaced here,
/// only via state and events.
///
/// [`ConnectionManager`]: crate::connection::ConnectionManager
#[derive(Clone)]
pub struct WsHandle {
    tx: mpsc::Sender<WsOutbound>,
    state: Arc<RwLock<ReadyState>>,
    last_message: Arc<RwLock<Option<String>>>,
}

impl WsHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<WsOutbound>,
        state: Arc<RwLock<ReadyState>>,
        last_message: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            tx,
            state,
            last_message,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ReadyState {
        *self.state.read()
    }

    /// Most recent inbound payload, if any. Only the latest frame is
    /// retained; there is no history buffer.
    pub fn last_message(&self) -> Option<String> {
        self.last_message.read().clone()
    }

    /// Queue a text frame for sending.
    ///
    /// No-op unless the connection is currently open.
    pub async fn send(&self, payload: impl Into<String>) {
        if self.state() != ReadyState::Open {
            debug!("send while not open, dropping payload");
            return;
        }
        if self.tx.send(WsOutbound::Text(payload.into())).await.is_err() {
            debug!("connection gone, dropping payload");
        }
    }

    /// Request a transport close.
    ///
    /// No-op unless the connection is currently open. Does not reset the
    /// reconnect budget: the resulting close still schedules a retry if
    /// attempts remain.
    pub async fn close(&self) {
        if self.state() != ReadyState::Open {
            debug!("close while not open, ignoring");
            return;
        }
        let _ = self.tx.send(WsOutbound::Close).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handle(state: ReadyState) -> (WsHandle, mpsc::Receiver<WsOutbound>) {
        let (tx, rx) = mpsc::channel(16);
        let handle = WsHandle::new(
            tx,
            Arc::new(RwLock::new(state)),
            Arc::new(RwLock::new(None)),
        );
        (handle, rx)
    }

    #[tokio::test]
    async fn test_send_while_open() {
        let (handle, mut rx) = test_handle(ReadyState::Open);
        handle.send("hello").await;
        match rx.recv().await.unwrap() {
            WsOutbound::Text(text) => assert_eq!(text, "hello"),
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_while_closed_is_noop() {
        let (handle, mut rx) = test_handle(ReadyState::Closed);
        handle.send("hello").await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_close_only_while_open() {
        let (handle, mut rx) = test_handle(ReadyState::Connecting);
        handle.close().await;
        assert!(rx.try_recv().is_err());

        let (handle, mut rx) = test_handle(ReadyState::Open);
        handle.close().await;
        assert!(matches!(rx.recv().await.unwrap(), WsOutbound::Close));
    }
}
