//! Event bus and the lifecycle events of the request pipeline
//!
//! A send publishes typed events ([`PreSendEvent`], [`PostSendEvent`],
//! [`ExceptionEvent`] and their batch counterparts) through the
//! [`EventDispatcher`]. [`Subscriber`]s declare which kinds they handle and at
//! which priority; every handler receives the same event by `&mut` and may
//! rewrite it or stop its propagation.

pub mod dispatcher;
pub mod kind;
pub mod multi;
pub mod single;
pub mod subscriber;

pub use dispatcher::EventDispatcher;
pub use kind::EventKind;
pub use multi::{MultiRequestCreatedEvent, MultiRequestErroredEvent, MultiRequestSentEvent};
pub use single::{ExceptionEvent, PostSendEvent, PreSendEvent};
pub use subscriber::{Subscriber, Subscription};

use crate::adapter::HttpAdapter;
use crate::error::Result;

mod sealed {
    pub trait Sealed {}
}

/// Behavior shared by the six event types.
///
/// Sealed: the set of events is closed.
pub trait Event<'a>: sealed::Sealed {
    const KIND: EventKind;

    /// The adapter performing the send.
    fn adapter(&self) -> &'a HttpAdapter;

    /// Prevents handlers after the current one from seeing this event.
    fn stop_propagation(&mut self);

    fn is_propagation_stopped(&self) -> bool;

    /// Calls the handler of `subscriber` matching this event's kind.
    #[doc(hidden)]
    fn deliver(&mut self, subscriber: &dyn Subscriber) -> Result<()>;
}
