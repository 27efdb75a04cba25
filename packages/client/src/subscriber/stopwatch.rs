//! Request timing

use std::sync::Arc;

use crate::adapter::HttpAdapter;
use crate::error::Result;
use crate::event::{
    Event, EventKind, ExceptionEvent, PostSendEvent, PreSendEvent, Subscriber, Subscription,
};
use crate::http::InternalRequest;
use crate::telemetry::TimerSink;

/// Times every single send with a timer named `"<adapter> (<url>)"`.
///
/// Two in-flight sends to the same URL through the same adapter share a
/// name. A send short-circuited during `PreSend` never reaches `PostSend`
/// or `Exception`, so its timer is not stopped.
pub struct StopwatchSubscriber {
    sink: Arc<dyn TimerSink>,
}

impl StopwatchSubscriber {
    pub const PRIORITY: i32 = 10000;

    pub fn new(sink: Arc<dyn TimerSink>) -> Self {
        Self { sink }
    }

    #[must_use]
    pub fn sink(&self) -> &Arc<dyn TimerSink> {
        &self.sink
    }

    /// Name of the timer used for `request` sent through `adapter`.
    #[must_use]
    pub fn timer_name(adapter: &HttpAdapter, request: &InternalRequest) -> String {
        format!("{} ({})", adapter.name(), request.url())
    }
}

impl Subscriber for StopwatchSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PreSend, "on_pre_send", Self::PRIORITY),
            Subscription::new(EventKind::PostSend, "on_post_send", Self::PRIORITY),
            Subscription::new(EventKind::Exception, "on_exception", Self::PRIORITY),
        ]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        self.sink
            .start(&Self::timer_name(event.adapter(), event.request()));
        Ok(())
    }

    fn on_post_send(&self, event: &mut PostSendEvent<'_>) -> Result<()> {
        self.sink
            .stop(&Self::timer_name(event.adapter(), event.request()));
        Ok(())
    }

    fn on_exception(&self, event: &mut ExceptionEvent<'_>) -> Result<()> {
        if let Some(request) = event.request() {
            self.sink.stop(&Self::timer_name(event.adapter(), request));
        }
        Ok(())
    }
}
