//! HTTP adapter prelude
//!
//! The types needed to build an adapter, send requests and write
//! subscribers.

// Adapter façade and backend contract
pub use crate::adapter::{BatchResponse, HttpAdapter};
pub use crate::backend::{Backend, BatchItem};
pub use crate::config::{AdapterConfig, Validator};

// Message model
pub use crate::http::{
    InternalRequest, MessageFactory, Parameters, RawResponse, Request, RequestBody, RequestId,
    Response,
};

// Error types
pub use crate::error::{Error, HttpAdapterError, Kind, TransportError};

// Event pipeline
pub use crate::event::{
    Event, EventDispatcher, EventKind, ExceptionEvent, MultiRequestCreatedEvent,
    MultiRequestErroredEvent, MultiRequestSentEvent, PostSendEvent, PreSendEvent, Subscriber,
    Subscription,
};

// Bundled subscribers and their collaborators
pub use crate::cookie::{CookieJar, Jar};
pub use crate::redirect::Policy as RedirectPolicy;
pub use crate::retry::RetryPolicy;
pub use crate::subscriber::{
    BasicAuthSubscriber, CookieSubscriber, HistorySubscriber, LoggerSubscriber,
    RedirectSubscriber, RetrySubscriber, StatusCodeSubscriber, StopwatchSubscriber,
};
pub use crate::telemetry::{Journal, JournalEntry, Stopwatch, TimerSink};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};

// URL handling
pub use url::Url;
