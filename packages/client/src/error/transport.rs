//! Failures reported by backends.
//!
//! A backend only knows about the wire; the adapter turns these into a
//! [`crate::Error`] of kind `Transport` carrying the URL and adapter name.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not resolve host: {0}")]
    Resolve(String),

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("TLS failure: {0}")]
    Tls(String),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Timeout(_) => true,
            TransportError::Io(io) => io.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}
