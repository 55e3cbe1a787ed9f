//! # remotepad-client
//!
//! The RemotePad client application: feeds touch samples through the
//! `remotepad-core` gesture pipeline and streams the resulting commands to a
//! mouse server over a single TCP connection.
//!
//! # Architecture
//!
//! ```text
//! input surface ──┐
//! scroll surface ─┼─> SessionInput queue ─> TouchSession ─┐
//! click buttons ──┘       (one ordered queue,             │ Command
//!                          classifier deadlines            ▼
//!                          interleave here)         TransportChannel
//!                                                   (single worker,
//!                                                    FIFO writes)
//!                                                          │
//!                          PadAppState <── StatusEvent ────┘
//! ```
//!
//! Two execution contexts only: the session task (never blocks on I/O) and
//! the transport worker (performs every connect and write).  They share
//! nothing but moved command values and one-directional status events.

pub mod application;
pub mod infrastructure;
