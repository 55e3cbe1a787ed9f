//! # remotepad-core
//!
//! Shared library for RemotePad containing the gesture classifier, the
//! motion/scroll filters, and the wire-command vocabulary spoken to the
//! mouse server.
//!
//! This crate is pure domain logic: it has zero dependencies on sockets,
//! timers, or OS APIs.  Time enters only as `i64` millisecond values carried
//! by touch samples or passed in by the caller, which keeps every decision
//! the classifier makes deterministic and unit-testable.
//!
//! # Architecture overview
//!
//! RemotePad turns a phone's touch surface into a remote trackpad.  Raw touch
//! samples (finger down / move / up, with coordinates and timestamps) flow
//! through this pipeline:
//!
//! ```text
//! TouchSample ─> GestureClassifier ─> GestureEvent ─> Command ─> (transport)
//!                    │
//!                    └─ MotionFilter (threshold + send-interval cooldown)
//! ```
//!
//! - **`gesture`** – The classifier state machine that disambiguates tap,
//!   double-tap, double-tap-hold drag, long-press, and pan from a single
//!   stream of samples, plus the filters that suppress movement noise and
//!   throttle high-frequency motion.
//!
//! - **`protocol`** – The fixed vocabulary of newline-delimited text commands
//!   (`LCLICK`, `M,<dx>,<dy>`, `DRAG_MOVE,<dx>,<dy>`, …) the server replays
//!   as OS-level mouse input.

pub mod gesture;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `remotepad_core::GestureClassifier` instead of the full module path.
pub use gesture::classifier::GestureClassifier;
pub use gesture::config::GestureConfig;
pub use gesture::event::GestureEvent;
pub use gesture::filter::{MotionFilter, ScrollFilter};
pub use gesture::sample::{TouchPhase, TouchSample};
pub use protocol::command::Command;
