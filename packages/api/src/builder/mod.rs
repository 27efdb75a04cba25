//! Adapter builder
//!
//! Fluent construction of an [`HttpAdapter`](http_adapter_client::HttpAdapter):
//! configuration first, then the bundled subscribers in the order they should
//! be registered, then [`AdapterBuilder::build`].

pub mod config;
pub mod core;
pub mod subscribers;

pub use self::core::AdapterBuilder;
