//! Connection-endpoint validation.
//!
//! The connection-setup surface collects a host string and a port.  Invalid
//! input is rejected here, before any socket work begins, and the error is
//! surfaced back to that surface — the gesture/transport core never sees a
//! malformed endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while validating user-supplied connection settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// The host field was empty or whitespace.
    #[error("host must not be empty")]
    EmptyHost,

    /// The port was not a number in 1..=65535.
    #[error("invalid port: {0:?}")]
    InvalidPort(String),
}

/// A validated host/port pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Validates an already-typed host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if port == 0 {
            return Err(EndpointError::InvalidPort("0".to_string()));
        }
        Ok(Self {
            host: host.trim().to_string(),
            port,
        })
    }

    /// Parses the raw text fields exactly as the setup surface provides them.
    pub fn parse(host: &str, port: &str) -> Result<Self, EndpointError> {
        let port_text = port.trim();
        let port: u16 = port_text
            .parse()
            .map_err(|_| EndpointError::InvalidPort(port_text.to_string()))?;
        Self::new(host, port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
