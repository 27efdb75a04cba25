//! Events of the batch pipeline
//!
//! Elements are matched by the [`RequestId`] embedded in each request,
//! response or error, never by position: backends may answer out of order.

use super::kind::EventKind;
use super::subscriber::Subscriber;
use super::{Event, sealed};
use crate::adapter::HttpAdapter;
use crate::error::{Error, Result};
use crate::http::{InternalRequest, RequestId, Response};

fn error_request_id(error: &Error) -> Option<RequestId> {
    error.request().map(|request| request.id())
}

/// Published before a batch is handed to the backend.
pub struct MultiRequestCreatedEvent<'a> {
    adapter: &'a HttpAdapter,
    requests: Vec<InternalRequest>,
    responses: Vec<Response>,
    errors: Vec<Error>,
    propagation_stopped: bool,
}

impl<'a> MultiRequestCreatedEvent<'a> {
    #[must_use]
    pub fn new(adapter: &'a HttpAdapter, requests: Vec<InternalRequest>) -> Self {
        Self {
            adapter,
            requests,
            responses: Vec::new(),
            errors: Vec::new(),
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn requests(&self) -> &[InternalRequest] {
        &self.requests
    }

    pub fn requests_mut(&mut self) -> &mut Vec<InternalRequest> {
        &mut self.requests
    }

    pub fn set_requests(&mut self, requests: Vec<InternalRequest>) {
        self.requests = requests;
    }

    pub fn remove_request(&mut self, id: RequestId) -> Option<InternalRequest> {
        let position = self.requests.iter().position(|request| request.id() == id)?;
        Some(self.requests.remove(position))
    }

    /// Answers the request `id` without sending it.
    ///
    /// Returns `false` when no pending request has that id.
    pub fn short_circuit(&mut self, id: RequestId, response: Response) -> bool {
        match self.remove_request(id) {
            Some(request) => {
                let response = match response.request() {
                    Some(_) => response,
                    None => response.with_request(std::sync::Arc::new(request)),
                };
                self.responses.push(response);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Adds a response to the batch outcome.
    ///
    /// A pending request with the same id is answered by it and no longer
    /// sent.
    pub fn add_response(&mut self, response: Response) {
        if let Some(id) = response.request_id() {
            self.remove_request(id);
        }
        self.responses.push(response);
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Fails a request before sending; remove the request itself with
    /// [`Self::remove_request`].
    pub fn add_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub(crate) fn into_parts(self) -> (Vec<InternalRequest>, Vec<Response>, Vec<Error>) {
        (self.requests, self.responses, self.errors)
    }
}

impl sealed::Sealed for MultiRequestCreatedEvent<'_> {}

impl<'a> Event<'a> for MultiRequestCreatedEvent<'a> {
    const KIND: EventKind = EventKind::MultiRequestCreated;

    fn adapter(&self) -> &'a HttpAdapter {
        self.adapter
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    fn deliver(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        subscriber.on_multi_request_created(self)
    }
}

/// Published with every response a batch produced.
pub struct MultiRequestSentEvent<'a> {
    adapter: &'a HttpAdapter,
    responses: Vec<Response>,
    errors: Vec<Error>,
    propagation_stopped: bool,
}

impl<'a> MultiRequestSentEvent<'a> {
    #[must_use]
    pub fn new(adapter: &'a HttpAdapter, responses: Vec<Response>) -> Self {
        Self {
            adapter,
            responses,
            errors: Vec::new(),
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn responses_mut(&mut self) -> &mut Vec<Response> {
        &mut self.responses
    }

    pub fn set_responses(&mut self, responses: Vec<Response>) {
        self.responses = responses;
    }

    pub fn remove_response(&mut self, id: RequestId) -> Option<Response> {
        let position = self
            .responses
            .iter()
            .position(|response| response.request_id() == Some(id))?;
        Some(self.responses.remove(position))
    }

    pub fn add_response(&mut self, response: Response) {
        self.responses.push(response);
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Marks a request of the batch as failed; it moves to the errored event.
    pub fn add_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub(crate) fn into_parts(self) -> (Vec<Response>, Vec<Error>) {
        (self.responses, self.errors)
    }
}

impl sealed::Sealed for MultiRequestSentEvent<'_> {}

impl<'a> Event<'a> for MultiRequestSentEvent<'a> {
    const KIND: EventKind = EventKind::MultiRequestSent;

    fn adapter(&self) -> &'a HttpAdapter {
        self.adapter
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    fn deliver(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        subscriber.on_multi_request_sent(self)
    }
}

/// Published with every failure of a batch.
pub struct MultiRequestErroredEvent<'a> {
    adapter: &'a HttpAdapter,
    errors: Vec<Error>,
    responses: Vec<Response>,
    propagation_stopped: bool,
}

impl<'a> MultiRequestErroredEvent<'a> {
    #[must_use]
    pub fn new(adapter: &'a HttpAdapter, errors: Vec<Error>) -> Self {
        Self {
            adapter,
            errors,
            responses: Vec::new(),
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut Vec<Error> {
        &mut self.errors
    }

    pub fn set_errors(&mut self, errors: Vec<Error>) {
        self.errors = errors;
    }

    pub fn remove_error(&mut self, id: RequestId) -> Option<Error> {
        let position = self
            .errors
            .iter()
            .position(|error| error_request_id(error) == Some(id))?;
        Some(self.errors.remove(position))
    }

    pub fn add_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Recovers a failed request of the batch with `response`.
    pub fn add_response(&mut self, response: Response) {
        self.responses.push(response);
    }

    pub(crate) fn into_parts(self) -> (Vec<Error>, Vec<Response>) {
        (self.errors, self.responses)
    }
}

impl sealed::Sealed for MultiRequestErroredEvent<'_> {}

impl<'a> Event<'a> for MultiRequestErroredEvent<'a> {
    const KIND: EventKind = EventKind::MultiRequestErrored;

    fn adapter(&self) -> &'a HttpAdapter {
        self.adapter
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    fn deliver(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        subscriber.on_multi_request_errored(self)
    }
}
