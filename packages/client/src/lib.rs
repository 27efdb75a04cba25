//! # HTTP adapter client
//!
//! Unified HTTP adapter with an event-driven request pipeline. The concrete
//! HTTP client is a [`Backend`]; everything around the wire (cookies,
//! retries, redirects, timing, status validation) is implemented by
//! [`Subscriber`]s reacting to pipeline events.
//!
//! ## Features
//!
//! - **Backend-agnostic façade** with single and batch sends
//! - **Priority-ordered event bus** with propagation stopping
//! - **Short-circuit and recovery** from `PreSend` and `Exception` listeners
//! - **Batch correlation by request id**, never by position
//! - **Cookie jar** backed by `cookie_store`
//! - **Retry** with exponential backoff and jitter
//! - **Redirect following** with configurable policy
//!
//! ## Usage
//!
//! ```rust
//! use http_adapter_client::prelude::*;
//!
//! struct Canned;
//!
//! impl Backend for Canned {
//!     fn name(&self) -> &str {
//!         "canned"
//!     }
//!
//!     fn send(
//!         &self,
//!         _request: &InternalRequest,
//!         _config: &AdapterConfig,
//!     ) -> Result<RawResponse, TransportError> {
//!         Ok(RawResponse::new(StatusCode::OK).with_body("hello"))
//!     }
//! }
//!
//! let mut adapter = HttpAdapter::new(Canned);
//! adapter.subscribe(std::sync::Arc::new(StatusCodeSubscriber::new()));
//!
//! let response = adapter.get("http://example.com/", &[]).unwrap();
//! assert_eq!(response.text(), "hello");
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod adapter;
pub mod backend;
pub mod config;
pub mod cookie;
pub mod error;
pub mod event;
pub mod http;
pub mod redirect;
pub mod retry;
pub mod subscriber;
pub mod telemetry;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;
