//! TCP transport: one worker task owns the socket, everyone else enqueues.
//!
//! All socket work — the connect, every write, the shutdown — happens on a
//! single tokio task draining one mpsc queue, so commands reach the wire in
//! exactly the order callers enqueued them and no input surface ever blocks
//! on the network.
//!
//! Failure policy, deliberately asymmetric:
//! - a failed **connect** is terminal: the worker reports
//!   [`StatusEvent::ConnectionFailed`] once and exits; there is no retry loop.
//! - a failed **send** is not: the error is logged and reported, the command
//!   is dropped, and the worker keeps draining the queue.
//! - **close** never fails from the caller's perspective, whatever state the
//!   connection is in.

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use remotepad_core::Command;

use crate::application::endpoint::Endpoint;
use crate::application::session::CommandSink;
use crate::infrastructure::ui_bridge::StatusEvent;

/// Errors the transport worker can hit on the socket.  Callers never see
/// these as return values; they surface as [`StatusEvent`]s.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect to {endpoint} failed: {source}")]
    ConnectFailed {
        endpoint: Endpoint,
        #[source]
        source: std::io::Error,
    },

    #[error("send failed: {0}")]
    Send(#[from] std::io::Error),
}

/// Upper bound on commands queued ahead of the socket.  A queue this deep
/// only forms when the link has stalled; beyond it, stale motion deltas are
/// dropped rather than replayed seconds late.
pub const COMMAND_QUEUE_DEPTH: usize = 128;

// ── Worker messages ───────────────────────────────────────────────────────────

#[derive(Debug)]
enum TransportRequest {
    Send(Command),
    Close,
}

// ── Public handle ─────────────────────────────────────────────────────────────

/// Cheaply cloneable handle to the transport worker.
///
/// Every clone enqueues onto the same FIFO queue; drop all clones (or call
/// [`close`](TransportChannel::close)) and the worker tears the socket down.
#[derive(Clone)]
pub struct TransportChannel {
    tx: mpsc::Sender<TransportRequest>,
}

impl TransportChannel {
    /// Spawns the transport worker and begins connecting to `endpoint`.
    ///
    /// Returns immediately; connection progress and failures arrive on the
    /// returned status receiver.  Commands enqueued while the connect is
    /// still in flight are written once it completes, in order.
    pub fn connect(endpoint: Endpoint) -> (Self, mpsc::Receiver<StatusEvent>) {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (status_tx, status_rx) = mpsc::channel(32);

        tokio::spawn(run_worker(endpoint, rx, status_tx));

        (Self { tx }, status_rx)
    }

    /// Enqueues one command, fire-and-forget.
    ///
    /// If the queue is full or the worker has already exited the command is
    /// dropped with a warning; input surfaces must never stall on the
    /// network.
    pub fn send(&self, command: Command) {
        if let Err(err) = self.tx.try_send(TransportRequest::Send(command)) {
            warn!(%err, "command dropped: transport queue unavailable");
        }
    }

    /// Requests an orderly shutdown: the socket closes after every command
    /// enqueued before this call has been written.  Never fails — closing a
    /// connection that never opened, already failed, or was already closed
    /// is a no-op.
    pub fn close(&self) {
        // A full queue or a dead worker both mean the socket is going away
        // anyway; dropping the request is fine.
        let _ = self.tx.try_send(TransportRequest::Close);
    }
}

impl CommandSink for TransportChannel {
    fn submit(&self, command: Command) {
        self.send(command);
    }

    fn close(&self) {
        TransportChannel::close(self);
    }
}

// ── Worker loop ───────────────────────────────────────────────────────────────

async fn run_worker(
    endpoint: Endpoint,
    mut rx: mpsc::Receiver<TransportRequest>,
    status_tx: mpsc::Sender<StatusEvent>,
) {
    let _ = status_tx.send(StatusEvent::Connecting).await;
    info!(%endpoint, "connecting");

    let mut stream = match TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await {
        Ok(stream) => stream,
        Err(source) => {
            let err = TransportError::ConnectFailed {
                endpoint: endpoint.clone(),
                source,
            };
            error!(%err);
            let _ = status_tx
                .send(StatusEvent::ConnectionFailed {
                    reason: err.to_string(),
                })
                .await;
            return;
        }
    };

    // Motion commands are tiny and latency-sensitive.
    if let Err(err) = stream.set_nodelay(true) {
        warn!(%err, "could not disable Nagle's algorithm");
    }

    info!(%endpoint, "connected");
    let _ = status_tx
        .send(StatusEvent::Connected {
            endpoint: endpoint.clone(),
        })
        .await;

    while let Some(request) = rx.recv().await {
        match request {
            TransportRequest::Send(command) => {
                let mut line = command.encode();
                line.push('\n');
                debug!(line = line.trim_end(), "sending");
                if let Err(err) = write_all_flushed(&mut stream, line.as_bytes()).await {
                    // The command is lost but the session keeps running; the
                    // user sees the failure on the status surface.
                    error!(%err, ?command, "send failed");
                    let _ = status_tx
                        .send(StatusEvent::SendFailed {
                            reason: err.to_string(),
                        })
                        .await;
                }
            }
            TransportRequest::Close => break,
        }
    }

    // Best-effort teardown: the peer may already be gone.
    if let Err(err) = stream.shutdown().await {
        debug!(%err, "socket shutdown error ignored");
    }
    info!(%endpoint, "disconnected");
    let _ = status_tx.send(StatusEvent::Closed).await;
}

async fn write_all_flushed(stream: &mut TcpStream, bytes: &[u8]) -> Result<(), TransportError> {
    stream.write_all(bytes).await?;
    stream.flush().await?;
    Ok(())
}
