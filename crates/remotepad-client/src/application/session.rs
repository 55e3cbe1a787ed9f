//! The touch session: one ordered queue from input surfaces to the wire.
//!
//! Every surface — the touchpad area, the scroll strip, the click buttons —
//! funnels into a single [`SessionInput`] channel, and the classifier's timer
//! deadlines are resolved on that same queue.  Ordering between "the finger
//! lifted" and "the drag-decision timer fired" is therefore decided exactly
//! once, by queue position, never by racing callbacks.
//!
//! The session never performs I/O.  It hands each encoded command to a
//! [`CommandSink`]; in production that is the transport channel, in tests a
//! recording fake.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::time::sleep_until;
use tracing::{debug, info};

use remotepad_core::{
    Command, GestureClassifier, GestureConfig, GestureEvent, ScrollFilter, TouchSample,
};

/// Upper bound on queued session inputs before senders see backpressure.
pub const SESSION_QUEUE_DEPTH: usize = 256;

// ── Session inputs ────────────────────────────────────────────────────────────

/// The dedicated click buttons beside the touchpad surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    Left,
    Right,
}

/// Everything the session loop consumes, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionInput {
    /// A sample from the main touchpad surface.
    Touchpad(TouchSample),
    /// A sample from the scroll strip.
    Scroll(TouchSample),
    /// A dedicated button press; bypasses classification entirely.
    Button(PadButton),
    /// Stop the session and close the sink.
    Shutdown,
}

// ── Output seam ───────────────────────────────────────────────────────────────

/// Where the session delivers encoded commands.
///
/// Both methods are fire-and-forget: the session must never stall on the
/// network, so delivery failures are the sink's problem to report out of band.
pub trait CommandSink: Send + Sync {
    fn submit(&self, command: Command);
    fn close(&self);
}

// ── Session loop ──────────────────────────────────────────────────────────────

/// Runs the gesture pipeline over one input queue until shutdown.
pub struct TouchSession<S: CommandSink> {
    classifier: GestureClassifier,
    scroll_filter: ScrollFilter,
    sink: S,
}

impl<S: CommandSink> TouchSession<S> {
    pub fn new(config: GestureConfig, sink: S) -> Self {
        Self {
            classifier: GestureClassifier::new(config.clone()),
            scroll_filter: ScrollFilter::new(&config),
            sink,
        }
    }

    /// Consumes inputs until the channel closes or a `Shutdown` arrives, then
    /// closes the sink.
    ///
    /// Timer deadlines interleave with inputs here: the loop sleeps until the
    /// classifier's earliest pending deadline and feeds the expiry back as if
    /// it were one more queue item.
    pub async fn run(mut self, mut rx: mpsc::Receiver<SessionInput>) {
        info!("touch session started");
        loop {
            match self.classifier.next_deadline() {
                Some(deadline_ms) => {
                    tokio::select! {
                        // Inputs win ties so a sample already queued is never
                        // reordered behind the timer it races.
                        biased;
                        input = rx.recv() => match input {
                            Some(SessionInput::Shutdown) | None => break,
                            Some(input) => self.handle_input(input),
                        },
                        _ = sleep_until(deadline_instant(deadline_ms)) => {
                            // The instant conversion truncates to whole
                            // milliseconds; clamp so the wakeup always covers
                            // the deadline it slept for.
                            self.handle_timer(epoch_millis().max(deadline_ms));
                        }
                    }
                }
                None => match rx.recv().await {
                    Some(SessionInput::Shutdown) | None => break,
                    Some(input) => self.handle_input(input),
                },
            }
        }
        info!("touch session stopping");
        // The server must not be left holding the button if the session dies
        // mid-drag.
        if self.classifier.is_dragging() {
            self.sink.submit(Command::DragEnd);
        }
        self.sink.close();
    }

    /// Processes one queued input synchronously.
    pub fn handle_input(&mut self, input: SessionInput) {
        match input {
            SessionInput::Touchpad(sample) => {
                for event in self.classifier.handle_sample(&sample) {
                    self.dispatch(&event);
                }
            }
            SessionInput::Scroll(sample) => {
                if let Some(event) = self.scroll_filter.handle_sample(&sample) {
                    self.dispatch(&event);
                }
            }
            SessionInput::Button(button) => {
                let command = match button {
                    PadButton::Left => Command::LeftClick,
                    PadButton::Right => Command::RightClick,
                };
                debug!(?command, "button press");
                self.sink.submit(command);
            }
            SessionInput::Shutdown => {}
        }
    }

    /// Fires any classifier deadline that has expired by `now_ms`.
    pub fn handle_timer(&mut self, now_ms: i64) {
        for event in self.classifier.handle_timer(now_ms) {
            self.dispatch(&event);
        }
    }

    fn dispatch(&self, event: &GestureEvent) {
        let command = Command::from(event);
        debug!(?event, ?command, "gesture dispatched");
        self.sink.submit(command);
    }
}

// ── Clock helpers ─────────────────────────────────────────────────────────────

/// Wall-clock milliseconds since the Unix epoch, the timebase touch samples
/// are stamped in.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Converts an epoch-milliseconds deadline into a tokio sleep instant.
/// Deadlines already in the past resolve to "now" and fire immediately.
fn deadline_instant(deadline_ms: i64) -> tokio::time::Instant {
    let now_ms = epoch_millis();
    let delta = Duration::from_millis(deadline_ms.saturating_sub(now_ms).max(0) as u64);
    tokio::time::Instant::from_std(Instant::now() + delta)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
