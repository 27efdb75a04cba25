//! Turns unwanted status codes into errors

use std::sync::Arc;

use http::StatusCode;

use crate::error::{self, Result};
use crate::event::{Event, EventKind, MultiRequestSentEvent, PostSendEvent, Subscriber, Subscription};

type Validator = Box<dyn Fn(StatusCode) -> bool + Send + Sync>;

/// Fails sends whose response status does not pass a validator.
///
/// The default validator accepts every status below 400.
pub struct StatusCodeSubscriber {
    validator: Validator,
}

impl Default for StatusCodeSubscriber {
    fn default() -> Self {
        Self::with_validator(|status| status.as_u16() < 400)
    }
}

impl StatusCodeSubscriber {
    pub const PRIORITY: i32 = 200;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `validator` to decide which statuses are acceptable.
    pub fn with_validator<F>(validator: F) -> Self
    where
        F: Fn(StatusCode) -> bool + Send + Sync + 'static,
    {
        Self {
            validator: Box::new(validator),
        }
    }

    #[must_use]
    pub fn is_valid(&self, status: StatusCode) -> bool {
        (self.validator)(status)
    }
}

impl Subscriber for StatusCodeSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PostSend, "on_post_send", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestSent, "on_multi_request_sent", Self::PRIORITY),
        ]
    }

    fn on_post_send(&self, event: &mut PostSendEvent<'_>) -> Result<()> {
        if event.has_error() || self.is_valid(event.response().status()) {
            return Ok(());
        }

        let error = error::status_code(
            event.adapter().name(),
            Arc::clone(event.request()),
            event.response().clone(),
        );
        event.set_error(error);
        event.stop_propagation();
        Ok(())
    }

    fn on_multi_request_sent(&self, event: &mut MultiRequestSentEvent<'_>) -> Result<()> {
        let adapter = event.adapter().name();
        let responses = std::mem::take(event.responses_mut());
        let mut kept = Vec::with_capacity(responses.len());
        let mut failed = Vec::new();

        for response in responses {
            match response.request() {
                Some(request) if !self.is_valid(response.status()) => {
                    let request = Arc::clone(request);
                    failed.push(error::status_code(adapter, request, response));
                }
                _ => kept.push(response),
            }
        }

        event.set_responses(kept);
        for error in failed {
            event.add_error(error);
        }
        Ok(())
    }
}
