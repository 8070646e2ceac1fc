//! WebSocket client for the live ticker feed.
//!
//! Provides a single logical streaming connection with:
//! - Lifecycle state machine (uninstantiated → connecting → open → closed)
//! - Typed event delivery over a channel
//! - Bounded automatic reconnection with a fixed delay
//! - A cloneable handle for sending and closing

pub mod connection;
pub mod error;
pub mod event;
pub mod handle;

pub use connection::{ConnectionConfig, ConnectionManager};
pub use error::{WsError, WsResult};
pub use event::{ReadyState, WsEvent};
pub use handle::{WsHandle, WsOutbound};

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
