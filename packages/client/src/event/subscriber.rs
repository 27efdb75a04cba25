//! Listener contract

use super::kind::EventKind;
use super::multi::{MultiRequestCreatedEvent, MultiRequestErroredEvent, MultiRequestSentEvent};
use super::single::{ExceptionEvent, PostSendEvent, PreSendEvent};
use crate::error::Result;

/// One (event, handler, priority) registration declared by a subscriber.
///
/// Higher priorities run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub event: EventKind,
    /// Name of the handler, used in traces and diagnostics.
    pub handler: &'static str,
    pub priority: i32,
}

impl Subscription {
    #[must_use]
    pub const fn new(event: EventKind, handler: &'static str, priority: i32) -> Self {
        Self {
            event,
            handler,
            priority,
        }
    }
}

/// A unit implementing one cross-cutting concern through event handlers.
///
/// Only the handlers for kinds listed by [`Subscriber::subscribed_events`]
/// are ever called. Handlers mutate the event in place; returning `Err`
/// aborts the dispatch and the error reaches the caller of the send.
pub trait Subscriber: Send + Sync {
    fn subscribed_events(&self) -> Vec<Subscription>;

    fn on_pre_send(&self, _event: &mut PreSendEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn on_post_send(&self, _event: &mut PostSendEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn on_exception(&self, _event: &mut ExceptionEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn on_multi_request_created(&self, _event: &mut MultiRequestCreatedEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn on_multi_request_sent(&self, _event: &mut MultiRequestSentEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn on_multi_request_errored(&self, _event: &mut MultiRequestErroredEvent<'_>) -> Result<()> {
        Ok(())
    }
}
