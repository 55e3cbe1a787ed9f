//! The wire protocol spoken to the mouse server.
//!
//! Plain-text, newline-delimited commands over a single TCP stream, client to
//! server only.  There is no framing beyond the line terminator, no escaping,
//! and no responses to parse.

pub mod command;
