//! Cookie persistence across sends

use std::sync::Arc;

use crate::cookie::CookieJar;
use crate::error::{Error, Result};
use crate::event::{
    EventKind, ExceptionEvent, MultiRequestCreatedEvent, MultiRequestErroredEvent,
    MultiRequestSentEvent, PostSendEvent, PreSendEvent, Subscriber, Subscription,
};

/// Adds jar cookies to outgoing requests and stores the cookies responses set.
pub struct CookieSubscriber {
    jar: Arc<dyn CookieJar>,
}

impl CookieSubscriber {
    pub const PRIORITY: i32 = 300;

    pub fn new(jar: impl CookieJar + 'static) -> Self {
        Self { jar: Arc::new(jar) }
    }

    /// Uses a jar shared with other owners.
    #[must_use]
    pub fn shared(jar: Arc<dyn CookieJar>) -> Self {
        Self { jar }
    }

    #[must_use]
    pub fn jar(&self) -> &Arc<dyn CookieJar> {
        &self.jar
    }

    fn extract_from_error(&self, error: &Error) {
        if let (Some(request), Some(response)) = (error.request(), error.response()) {
            self.jar.extract(request, response);
        }
    }
}

impl Subscriber for CookieSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PreSend, "on_pre_send", Self::PRIORITY),
            Subscription::new(EventKind::PostSend, "on_post_send", Self::PRIORITY),
            Subscription::new(EventKind::Exception, "on_exception", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestCreated, "on_multi_request_created", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestSent, "on_multi_request_sent", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestErrored, "on_multi_request_errored", Self::PRIORITY),
        ]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        let request = self.jar.populate(event.request());
        event.set_request(request);
        Ok(())
    }

    fn on_post_send(&self, event: &mut PostSendEvent<'_>) -> Result<()> {
        let response = event.response();
        let request = response.request().unwrap_or(event.request());
        self.jar.extract(request, response);
        Ok(())
    }

    fn on_exception(&self, event: &mut ExceptionEvent<'_>) -> Result<()> {
        self.extract_from_error(event.error());
        Ok(())
    }

    fn on_multi_request_created(&self, event: &mut MultiRequestCreatedEvent<'_>) -> Result<()> {
        for request in event.requests_mut() {
            *request = self.jar.populate(request);
        }
        Ok(())
    }

    fn on_multi_request_sent(&self, event: &mut MultiRequestSentEvent<'_>) -> Result<()> {
        for response in event.responses() {
            if let Some(request) = response.request() {
                self.jar.extract(request, response);
            }
        }
        Ok(())
    }

    fn on_multi_request_errored(&self, event: &mut MultiRequestErroredEvent<'_>) -> Result<()> {
        for error in event.errors() {
            self.extract_from_error(error);
        }
        Ok(())
    }
}
