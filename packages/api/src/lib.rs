//! # HTTP adapter
//!
//! One request/response model and one event pipeline over any HTTP client.
//! Plug a [`Backend`] in, pick the subscribers you need, send.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use http_adapter::prelude::*;
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
//!     ) -> std::result::Result<RawResponse, TransportError> {
//!         Ok(RawResponse::new(StatusCode::OK))
//!     }
//! }
//!
//! let journal = Arc::new(Journal::new());
//! let adapter = AdapterBuilder::new(Canned)
//!     .base_url("http://api.example.com/v1/")
//!     .cookies(Jar::default())
//!     .status_code_errors()
//!     .history(Arc::clone(&journal))
//!     .build()
//!     .unwrap();
//!
//! let response = adapter.get("users", &[]).unwrap();
//! assert!(response.is_success());
//! assert_eq!(journal.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::AdapterBuilder;

// Re-export the pipeline from the client package
pub use http_adapter_client::{
    backend, config, cookie, error, event, redirect, retry, subscriber, telemetry,
};

pub mod prelude {
    //! Everything needed to build an adapter and send requests.

    pub use crate::builder::AdapterBuilder;
    pub use http_adapter_client::prelude::*;
}

pub use prelude::*;

/// Starts an [`AdapterBuilder`] around `backend`.
pub fn builder(backend: impl Backend + 'static) -> AdapterBuilder {
    AdapterBuilder::new(backend)
}
