//! Connection lifecycle state and typed transport events.

use std::fmt;

/// Connection lifecycle state.
///
/// `Uninstantiated` is both the initial state and the state after a
/// transport error, mirroring the unset/errored ready state of the
/// browser WebSocket API this feed was originally consumed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Uninstantiated,
    Connecting,
    Open,
    Closing,
    Closed,
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReadyState::Uninstantiated => "uninstantiated",
            ReadyState::Connecting => "connecting",
            ReadyState::Open => "open",
            ReadyState::Closing => "closing",
            ReadyState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Typed transport notification delivered to the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsEvent {
    /// Transport established.
    Opened,
    /// Inbound text frame, payload verbatim.
    Message(String),
    /// Transport closed (server close frame or stream end).
    Closed,
    /// Transport error, including a failed connect attempt.
    Errored,
}
