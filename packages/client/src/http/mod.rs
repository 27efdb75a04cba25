//! HTTP message model
//!
//! Value objects shared by the adapter, the event pipeline and backends:
//! the caller-facing [`Request`], the normalized [`InternalRequest`] that
//! travels through events, and the [`Response`] bound to its request.

pub mod factory;
pub mod headers;
pub mod internal;
pub mod parameters;
pub mod request;
pub mod response;

pub use factory::MessageFactory;
pub use internal::{InternalRequest, RequestBody, RequestId};
pub use parameters::Parameters;
pub use request::Request;
pub use response::{RawResponse, Response};
