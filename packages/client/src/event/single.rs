//! Events of the single-request pipeline

use std::sync::Arc;

use super::kind::EventKind;
use super::subscriber::Subscriber;
use super::{Event, sealed};
use crate::adapter::HttpAdapter;
use crate::error::{Error, Result};
use crate::http::{InternalRequest, Response};

/// Published before the backend is called.
///
/// Listeners may replace the request, short-circuit the send by supplying a
/// response, or abort it with an error.
pub struct PreSendEvent<'a> {
    adapter: &'a HttpAdapter,
    request: InternalRequest,
    response: Option<Response>,
    error: Option<Error>,
    propagation_stopped: bool,
}

impl<'a> PreSendEvent<'a> {
    #[must_use]
    pub fn new(adapter: &'a HttpAdapter, request: InternalRequest) -> Self {
        Self {
            adapter,
            request,
            response: None,
            error: None,
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn request(&self) -> &InternalRequest {
        &self.request
    }

    pub fn set_request(&mut self, request: InternalRequest) {
        self.request = request;
    }

    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Supplies the final response; the backend will not be called.
    pub fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Aborts the send; the error goes through the `Exception` event.
    pub fn set_error(&mut self, error: Error) {
        self.error = Some(error);
    }

    pub(crate) fn into_parts(self) -> (InternalRequest, Option<Response>, Option<Error>) {
        (self.request, self.response, self.error)
    }
}

impl sealed::Sealed for PreSendEvent<'_> {}

impl<'a> Event<'a> for PreSendEvent<'a> {
    const KIND: EventKind = EventKind::PreSend;

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
        subscriber.on_pre_send(self)
    }
}

/// Published after the backend answered.
///
/// Listeners may replace the response or turn the send into a failure by
/// setting an error.
pub struct PostSendEvent<'a> {
    adapter: &'a HttpAdapter,
    request: Arc<InternalRequest>,
    response: Response,
    error: Option<Error>,
    propagation_stopped: bool,
}

impl<'a> PostSendEvent<'a> {
    #[must_use]
    pub fn new(adapter: &'a HttpAdapter, request: Arc<InternalRequest>, response: Response) -> Self {
        Self {
            adapter,
            request,
            response,
            error: None,
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn request(&self) -> &Arc<InternalRequest> {
        &self.request
    }

    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn set_response(&mut self, response: Response) {
        self.response = response;
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Turns the send into a failure; the adapter returns this error.
    pub fn set_error(&mut self, error: Error) {
        self.error = Some(error);
    }

    pub(crate) fn into_outcome(self) -> Result<Response> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}

impl sealed::Sealed for PostSendEvent<'_> {}

impl<'a> Event<'a> for PostSendEvent<'a> {
    const KIND: EventKind = EventKind::PostSend;

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
        subscriber.on_post_send(self)
    }
}

/// Published when a send failed.
///
/// A listener that attaches a response heals the pipeline: the adapter
/// returns that response instead of the error.
pub struct ExceptionEvent<'a> {
    adapter: &'a HttpAdapter,
    error: Error,
    response: Option<Response>,
    propagation_stopped: bool,
}

impl<'a> ExceptionEvent<'a> {
    #[must_use]
    pub fn new(adapter: &'a HttpAdapter, error: Error) -> Self {
        Self {
            adapter,
            error,
            response: None,
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn set_error(&mut self, error: Error) {
        self.error = error;
    }

    /// The request that failed, taken from the error.
    #[must_use]
    pub fn request(&self) -> Option<&Arc<InternalRequest>> {
        self.error.request()
    }

    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Recovers the send with `response`.
    pub fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    pub(crate) fn into_outcome(self) -> Result<Response> {
        match self.response {
            Some(response) => Ok(response),
            None => Err(self.error),
        }
    }
}

impl sealed::Sealed for ExceptionEvent<'_> {}

impl<'a> Event<'a> for ExceptionEvent<'a> {
    const KIND: EventKind = EventKind::Exception;

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
        subscriber.on_exception(self)
    }
}
