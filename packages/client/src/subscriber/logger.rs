//! Structured logging of send outcomes

use crate::adapter::HttpAdapter;
use crate::error::{Error, Result};
use crate::event::{
    Event, EventKind, ExceptionEvent, MultiRequestErroredEvent, MultiRequestSentEvent,
    PostSendEvent, Subscriber, Subscription,
};
use crate::http::Response;

/// Emits a `tracing` event for every response (`debug`) and every failure
/// (`error`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerSubscriber;

impl LoggerSubscriber {
    pub const PRIORITY: i32 = 100;

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn log_response(adapter: &HttpAdapter, response: &Response) {
        match response.request() {
            Some(request) => tracing::debug!(
                adapter = adapter.name(),
                request = %request.id(),
                method = %request.method(),
                url = %request.url(),
                status = response.status().as_u16(),
                "request sent"
            ),
            None => tracing::debug!(
                adapter = adapter.name(),
                status = response.status().as_u16(),
                "request sent"
            ),
        }
    }

    fn log_error(adapter: &HttpAdapter, error: &Error) {
        match error.request() {
            Some(request) => tracing::error!(
                adapter = adapter.name(),
                request = %request.id(),
                method = %request.method(),
                url = %request.url(),
                error = %error.cause(),
                "request failed"
            ),
            None => tracing::error!(
                adapter = adapter.name(),
                error = %error.cause(),
                "request failed"
            ),
        }
    }
}

impl Subscriber for LoggerSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PostSend, "on_post_send", Self::PRIORITY),
            Subscription::new(EventKind::Exception, "on_exception", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestSent, "on_multi_request_sent", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestErrored, "on_multi_request_errored", Self::PRIORITY),
        ]
    }

    fn on_post_send(&self, event: &mut PostSendEvent<'_>) -> Result<()> {
        Self::log_response(event.adapter(), event.response());
        Ok(())
    }

    fn on_exception(&self, event: &mut ExceptionEvent<'_>) -> Result<()> {
        Self::log_error(event.adapter(), event.error());
        Ok(())
    }

    fn on_multi_request_sent(&self, event: &mut MultiRequestSentEvent<'_>) -> Result<()> {
        for response in event.responses() {
            Self::log_response(event.adapter(), response);
        }
        Ok(())
    }

    fn on_multi_request_errored(&self, event: &mut MultiRequestErroredEvent<'_>) -> Result<()> {
        for error in event.errors() {
            Self::log_error(event.adapter(), error);
        }
        Ok(())
    }
}
