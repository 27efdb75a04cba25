use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::http::{InternalRequest, Response};

/// A Result alias where the Err case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents every failure the adapter pipeline can surface to a caller.
///
/// The error keeps the request that failed and, when one exists, the
/// response received before the failure was decided, so listeners further
/// down the pipeline (cookie extraction, retry) can work with it.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) url: Option<Url>,
    pub(crate) adapter: Option<String>,
    pub(crate) request: Option<Arc<InternalRequest>>,
    pub(crate) response: Option<Response>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The backend could not connect, resolve, transmit or finish in time.
    Transport,
    /// The backend answered but a subscriber judged the outcome a failure.
    Application,
    /// The request or the adapter configuration is invalid.
    Configuration,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
                adapter: None,
                request: None,
                response: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    #[must_use]
    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.inner.adapter = Some(adapter.into());
        self
    }

    /// Attaches the failing request. The URL is taken from it unless one was
    /// already set.
    #[must_use]
    pub fn with_request(mut self, request: Arc<InternalRequest>) -> Self {
        if self.inner.url.is_none() {
            self.inner.url = Some(request.url().clone());
        }
        self.inner.request = Some(request);
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.inner.response = Some(response);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.inner.url.as_ref()
    }

    /// Name of the adapter that was sending when the error occurred.
    #[must_use]
    pub fn adapter(&self) -> Option<&str> {
        self.inner.adapter.as_deref()
    }

    #[must_use]
    pub fn request(&self) -> Option<&Arc<InternalRequest>> {
        self.inner.request.as_ref()
    }

    /// The response received before the failure was decided, if any.
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.inner.response.as_ref()
    }

    pub fn take_response(&mut self) -> Option<Response> {
        self.inner.response.take()
    }

    /// Human readable root cause, without the URL/adapter framing.
    #[must_use]
    pub fn cause(&self) -> String {
        match self.inner.source {
            Some(ref source) => source.to_string(),
            None => self.kind_description().to_string(),
        }
    }

    fn kind_description(&self) -> &'static str {
        match self.inner.kind {
            Kind::Transport => "error sending request",
            Kind::Application => "request rejected",
            Kind::Configuration => "invalid configuration",
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("http_adapter::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", &url.as_str());
        }

        if let Some(ref adapter) = self.inner.adapter {
            f.field("adapter", adapter);
        }

        if let Some(ref request) = self.inner.request {
            f.field("request", &request.id());
        }

        if let Some(ref response) = self.inner.response {
            f.field("status", &response.status());
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.inner.url, &self.inner.adapter) {
            (Some(url), Some(adapter)) => write!(
                f,
                "An error occurred when fetching the URL \"{url}\" with the adapter \"{adapter}\" (\"{}\").",
                self.cause()
            ),
            (Some(url), None) => write!(f, "{} for URL \"{url}\" (\"{}\")", self.kind_description(), self.cause()),
            _ => match self.inner.source {
                Some(ref source) => write!(f, "{}: {source}", self.kind_description()),
                None => f.write_str(self.kind_description()),
            },
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
