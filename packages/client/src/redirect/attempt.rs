//! Attempt and Action types for redirect handling

use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;
use url::Url;

/// A type that holds information on the next request and previous requests
/// in redirect chain.
#[derive(Debug)]
pub struct Attempt<'a> {
    pub(crate) status: StatusCode,
    pub(crate) next: &'a Url,
    pub(crate) previous: &'a [Url],
}

/// An action to perform when a redirect status code is found.
#[derive(Debug)]
pub struct Action {
    pub(crate) inner: ActionKind,
}

pub(crate) enum ActionKind {
    Follow,
    Stop,
    Error(Box<dyn StdError + Send + Sync>),
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Follow => f.write_str("Follow"),
            ActionKind::Stop => f.write_str("Stop"),
            ActionKind::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
        }
    }
}

impl Attempt<'_> {
    /// Get the type of redirect.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the next URL to redirect to.
    #[must_use]
    pub fn url(&self) -> &Url {
        self.next
    }

    /// Get the list of previous URLs that have already been requested in this chain.
    #[must_use]
    pub fn previous(&self) -> &[Url] {
        self.previous
    }

    /// Returns an action meaning the redirect should be followed.
    #[must_use]
    pub fn follow(self) -> Action {
        Action {
            inner: ActionKind::Follow,
        }
    }

    /// Returns an action meaning the redirect should not be followed.
    ///
    /// The 30x response is returned as the outcome of the send.
    #[must_use]
    pub fn stop(self) -> Action {
        Action {
            inner: ActionKind::Stop,
        }
    }

    /// Returns an action failing the redirect with an error.
    ///
    /// The send fails with an application error carrying the 30x response.
    pub fn error<E: Into<Box<dyn StdError + Send + Sync>>>(self, error: E) -> Action {
        Action {
            inner: ActionKind::Error(error.into()),
        }
    }
}
