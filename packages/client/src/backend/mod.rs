//! Backend capability contract
//!
//! A backend is the concrete HTTP client doing the I/O (a blocking socket
//! client, an event loop, a multi-handle client). The adapter depends only on
//! this trait and never on a concrete backend type.

use std::sync::Arc;

use crate::config::AdapterConfig;
use crate::error::TransportError;
use crate::http::{InternalRequest, RawResponse, RequestId};

/// Outcome of one request inside a batch, tagged with the request it answers.
#[derive(Debug)]
pub struct BatchItem {
    pub id: RequestId,
    pub result: Result<RawResponse, TransportError>,
}

impl BatchItem {
    #[must_use]
    pub fn new(id: RequestId, result: Result<RawResponse, TransportError>) -> Self {
        Self { id, result }
    }
}

pub trait Backend: Send + Sync {
    /// Short name used in diagnostics, timer names and error messages.
    fn name(&self) -> &str;

    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request could not be delivered
    /// or no response arrived within `config.timeout`.
    fn send(
        &self,
        request: &InternalRequest,
        config: &AdapterConfig,
    ) -> Result<RawResponse, TransportError>;

    /// Sends a batch of requests.
    ///
    /// Results may come back in any order; each one names the request it
    /// answers. The default implementation sends sequentially; backends able
    /// to run requests concurrently override it.
    fn send_batch(
        &self,
        requests: &[Arc<InternalRequest>],
        config: &AdapterConfig,
    ) -> Vec<BatchItem> {
        requests
            .iter()
            .map(|request| BatchItem::new(request.id(), self.send(request, config)))
            .collect()
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(
        &self,
        request: &InternalRequest,
        config: &AdapterConfig,
    ) -> Result<RawResponse, TransportError> {
        (**self).send(request, config)
    }

    fn send_batch(
        &self,
        requests: &[Arc<InternalRequest>],
        config: &AdapterConfig,
    ) -> Vec<BatchItem> {
        (**self).send_batch(requests, config)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(
        &self,
        request: &InternalRequest,
        config: &AdapterConfig,
    ) -> Result<RawResponse, TransportError> {
        (**self).send(request, config)
    }

    fn send_batch(
        &self,
        requests: &[Arc<InternalRequest>],
        config: &AdapterConfig,
    ) -> Vec<BatchItem> {
        (**self).send_batch(requests, config)
    }
}
