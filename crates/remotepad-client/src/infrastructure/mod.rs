//! Infrastructure layer: TCP transport, configuration, status reporting, and
//! the scripted touch source used by the demo binary.

pub mod config;
pub mod input;
pub mod transport;
pub mod ui_bridge;
