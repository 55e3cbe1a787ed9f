//! Application layer: session orchestration and connection-setup validation.

pub mod endpoint;
pub mod session;
