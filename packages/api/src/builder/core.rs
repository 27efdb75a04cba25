//! Core `AdapterBuilder` structure and `build`

use std::fmt;
use std::sync::Arc;

use http_adapter_client::error::{self, Error};
use http_adapter_client::{
    AdapterConfig, Backend, BatchItem, HttpAdapter, InternalRequest, RawResponse, Subscriber,
    TransportError,
};

/// Builder for an [`HttpAdapter`].
///
/// Setter errors (an unparsable base URL, credentials that do not fit in a
/// header) are kept until [`AdapterBuilder::build`], which reports the first
/// one.
pub struct AdapterBuilder {
    pub(crate) backend: Box<dyn Backend>,
    pub(crate) name: Option<String>,
    pub(crate) config: AdapterConfig,
    pub(crate) subscribers: Vec<Arc<dyn Subscriber>>,
    pub(crate) error: Option<Error>,
}

impl AdapterBuilder {
    /// Starts a builder around `backend` with the default configuration.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            name: None,
            config: AdapterConfig::default(),
            subscribers: Vec::new(),
            error: None,
        }
    }

    /// Overrides the adapter name (the backend's name by default).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Registers a custom subscriber.
    #[must_use]
    pub fn subscriber(mut self, subscriber: Arc<dyn Subscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Keeps the first deferred error.
    pub(crate) fn fail(mut self, error: Error) -> Self {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self
    }

    /// Validates the configuration and assembles the adapter.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by a setter, or a configuration
    /// error when the configuration does not validate.
    pub fn build(self) -> Result<HttpAdapter, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let backend: Box<dyn Backend> = match self.name {
            Some(name) => Box::new(NamedBackend {
                name,
                inner: self.backend,
            }),
            None => self.backend,
        };

        let mut adapter = HttpAdapter::with_config(backend, self.config)?;
        let subscribers = self.subscribers.len();
        for subscriber in self.subscribers {
            adapter.subscribe(subscriber);
        }

        tracing::debug!(adapter = adapter.name(), subscribers, "adapter built");
        Ok(adapter)
    }
}

impl fmt::Debug for AdapterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterBuilder")
            .field("backend", &self.backend.name())
            .field("name", &self.name)
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .field("error", &self.error)
            .finish()
    }
}

/// Backend wrapper reporting a caller-chosen name.
struct NamedBackend {
    name: String,
    inner: Box<dyn Backend>,
}

impl Backend for NamedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(
        &self,
        request: &InternalRequest,
        config: &AdapterConfig,
    ) -> Result<RawResponse, TransportError> {
        self.inner.send(request, config)
    }

    fn send_batch(
        &self,
        requests: &[Arc<InternalRequest>],
        config: &AdapterConfig,
    ) -> Vec<BatchItem> {
        self.inner.send_batch(requests, config)
    }
}

pub(crate) fn configuration_error(message: impl Into<String>) -> Error {
    error::configuration(message.into())
}
