use std::error::Error as StdError;
use std::io;

use http::StatusCode;

use super::transport::TransportError;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the backend failed to deliver the request.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, Kind::Transport)
    }

    /// Returns true if a subscriber turned an answered request into a failure.
    #[must_use]
    pub fn is_application(&self) -> bool {
        matches!(self.inner.kind, Kind::Application)
    }

    /// Returns true if the request could not be built.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.inner.kind, Kind::Configuration)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(transport) = err.downcast_ref::<TransportError>() {
                if transport.is_timeout() {
                    return true;
                }
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }

    /// Returns the status code, if the error carries a response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.inner.response.as_ref().map(crate::http::Response::status)
    }
}
