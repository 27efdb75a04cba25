//! Batch pipeline

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use super::HttpAdapter;
use crate::error::{self, Error, Result, TransportError};
use crate::event::{MultiRequestCreatedEvent, MultiRequestErroredEvent, MultiRequestSentEvent};
use crate::http::{InternalRequest, Request, RequestId, Response};

/// Outcome of a batch: one response or one error per logical call.
///
/// Neither list follows submission order; look elements up by
/// [`RequestId`].
#[derive(Debug, Default)]
pub struct BatchResponse {
    responses: Vec<Response>,
    errors: Vec<Error>,
}

impl BatchResponse {
    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    #[must_use]
    pub fn response_for(&self, id: RequestId) -> Option<&Response> {
        self.responses
            .iter()
            .find(|response| response.request_id() == Some(id))
    }

    #[must_use]
    pub fn error_for(&self, id: RequestId) -> Option<&Error> {
        self.errors
            .iter()
            .find(|error| error.request().map(|request| request.id()) == Some(id))
    }

    /// `true` when no request of the batch failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len() + self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty() && self.errors.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Response>, Vec<Error>) {
        (self.responses, self.errors)
    }
}

impl HttpAdapter {
    /// Normalizes caller requests and sends them as one batch.
    ///
    /// # Errors
    ///
    /// Fails before any event is published if one of the requests cannot be
    /// normalized. See [`HttpAdapter::send_internal_requests`] otherwise.
    pub fn send_requests(&self, requests: Vec<Request>) -> Result<BatchResponse> {
        let requests = requests
            .into_iter()
            .map(|request| self.factory.create_internal_request(request))
            .collect::<Result<Vec<_>>>()?;
        self.send_internal_requests(requests)
    }

    /// Runs a batch through `MultiRequestCreated`, the backend, then
    /// `MultiRequestSent` and `MultiRequestErrored`.
    ///
    /// Failures of individual requests are reported in the returned
    /// [`BatchResponse`] and never abort their siblings.
    ///
    /// # Errors
    ///
    /// A configuration error, before any event is published, when two
    /// requests share an id. Otherwise only when a handler returns an error.
    pub fn send_internal_requests(&self, requests: Vec<InternalRequest>) -> Result<BatchResponse> {
        let mut seen = HashSet::with_capacity(requests.len());
        if let Some(request) = requests.iter().find(|request| !seen.insert(request.id())) {
            return Err(error::configuration(format!(
                "request {} appears more than once in the batch",
                request.id()
            ))
            .with_adapter(self.name())
            .with_request(Arc::new(request.clone())));
        }

        let mut event = MultiRequestCreatedEvent::new(self, requests);
        self.dispatcher.dispatch(&mut event)?;
        let (requests, short_circuited, mut errors) = event.into_parts();

        let requests: Vec<Arc<InternalRequest>> = requests.into_iter().map(Arc::new).collect();
        let mut responses = Vec::with_capacity(requests.len());

        if !requests.is_empty() {
            tracing::debug!(
                adapter = self.name(),
                requests = requests.len(),
                short_circuited = short_circuited.len(),
                "sending batch"
            );
            self.correlate(&requests, &mut responses, &mut errors);
        }

        if !responses.is_empty() {
            let mut event = MultiRequestSentEvent::new(self, responses);
            self.dispatcher.dispatch(&mut event)?;
            let (sent, failed) = event.into_parts();
            responses = sent;
            errors.extend(failed);
        }

        if !errors.is_empty() {
            let mut event = MultiRequestErroredEvent::new(self, errors);
            self.dispatcher.dispatch(&mut event)?;
            let (failed, recovered) = event.into_parts();
            errors = failed;
            responses.extend(recovered);
        }

        responses.extend(short_circuited);

        Ok(BatchResponse { responses, errors })
    }

    /// Sends `requests` and matches each backend result to its request by id.
    fn correlate(
        &self,
        requests: &[Arc<InternalRequest>],
        responses: &mut Vec<Response>,
        errors: &mut Vec<Error>,
    ) {
        let mut pending: HashMap<RequestId, Arc<InternalRequest>> = requests
            .iter()
            .map(|request| (request.id(), Arc::clone(request)))
            .collect();

        for item in self.backend.send_batch(requests, &self.config) {
            let Some(request) = pending.remove(&item.id) else {
                tracing::warn!(
                    adapter = self.name(),
                    request = %item.id,
                    "backend returned a result for an unknown or already answered request, ignoring"
                );
                continue;
            };

            match item.result {
                Ok(raw) => responses.push(self.factory.create_response(raw, request)),
                Err(e) => errors.push(error::transport(e, self.name(), request)),
            }
        }

        // Unanswered requests fail in submission order.
        for request in requests {
            if let Some(request) = pending.remove(&request.id()) {
                errors.push(error::transport(
                    TransportError::Other("no result returned by the backend".to_string()),
                    self.name(),
                    request,
                ));
            }
        }
    }
}
