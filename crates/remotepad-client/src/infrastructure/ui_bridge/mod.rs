//! Bridge between the transport worker and whatever status surface the
//! application mounts.
//!
//! The transport reports progress as [`StatusEvent`]s on a channel;
//! [`PadAppState`] folds them into the small amount of shared state a status
//! line or connection screen needs.  Nothing here touches the socket.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::application::endpoint::Endpoint;

// ── Status events ─────────────────────────────────────────────────────────────

/// Lifecycle of the connection, as reported by the transport worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Failed,
    Closed,
}

/// One status report from the transport worker, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// The connect attempt has started.
    Connecting,
    /// The socket is open and commands are flowing.
    Connected { endpoint: Endpoint },
    /// The connect attempt failed; the transport has exited.  Terminal.
    ConnectionFailed { reason: String },
    /// A single command failed to write; the connection is still up.
    SendFailed { reason: String },
    /// The socket was closed after an orderly shutdown.
    Closed,
}

impl StatusEvent {
    /// The connection state this event implies, if it changes one.
    /// `SendFailed` reports an error without leaving the connected state.
    pub fn state(&self) -> Option<ConnectionState> {
        match self {
            StatusEvent::Connecting => Some(ConnectionState::Connecting),
            StatusEvent::Connected { .. } => Some(ConnectionState::Connected),
            StatusEvent::ConnectionFailed { .. } => Some(ConnectionState::Failed),
            StatusEvent::SendFailed { .. } => None,
            StatusEvent::Closed => Some(ConnectionState::Closed),
        }
    }

    /// Human-readable line for a status display or log.
    pub fn display_line(&self) -> String {
        match self {
            StatusEvent::Connecting => "Connecting".to_string(),
            StatusEvent::Connected { endpoint } => format!("Connected to {endpoint}"),
            StatusEvent::ConnectionFailed { reason } => {
                format!("Connection failed: {reason}")
            }
            StatusEvent::SendFailed { reason } => format!("Send failed: {reason}"),
            StatusEvent::Closed => "Disconnected".to_string(),
        }
    }
}

// ── Shared application state ──────────────────────────────────────────────────

/// The connection status any frontend needs: current state plus the last
/// message worth showing.  Cloneable; all clones observe the same state.
#[derive(Clone)]
pub struct PadAppState {
    state: Arc<Mutex<ConnectionState>>,
    last_message: Arc<Mutex<String>>,
}

impl PadAppState {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ConnectionState::Connecting)),
            last_message: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Folds one status event into the shared state.
    pub async fn apply(&self, event: &StatusEvent) {
        if let Some(state) = event.state() {
            *self.state.lock().await = state;
        }
        let line = event.display_line();
        info!(status = %line);
        *self.last_message.lock().await = line;
    }

    /// Current state and last status line, for rendering.
    pub async fn snapshot(&self) -> (ConnectionState, String) {
        let state = *self.state.lock().await;
        let message = self.last_message.lock().await.clone();
        (state, message)
    }
}

impl Default for PadAppState {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
