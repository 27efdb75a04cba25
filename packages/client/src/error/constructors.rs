use std::sync::Arc;

use super::transport::TransportError;
use super::types::{Error, Kind};
use crate::http::{InternalRequest, Response};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a backend failure while sending `request`.
pub fn transport(e: TransportError, adapter: &str, request: Arc<InternalRequest>) -> Error {
    Error::new(Kind::Transport)
        .with(e)
        .with_adapter(adapter)
        .with_request(request)
}

/// Creates an `Error` for a failure decided by a subscriber.
pub fn application<E: Into<BoxError>>(e: E, adapter: &str, request: Arc<InternalRequest>) -> Error {
    Error::new(Kind::Application)
        .with(e.into())
        .with_adapter(adapter)
        .with_request(request)
}

/// Creates an `Error` for a response whose status code failed validation.
pub fn status_code(adapter: &str, request: Arc<InternalRequest>, response: Response) -> Error {
    application(
        format!("Status code: {}", response.status().as_u16()),
        adapter,
        request,
    )
    .with_response(response)
}

/// Creates an `Error` for a redirect chain that exceeded its policy.
pub fn redirect<E: Into<BoxError>>(
    e: E,
    adapter: &str,
    request: Arc<InternalRequest>,
    response: Response,
) -> Error {
    application(e, adapter, request).with_response(response)
}

/// Creates an `Error` for invalid request construction or configuration.
pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Configuration).with(e.into())
}

/// Creates an `Error` for a URL that cannot be used for a request.
pub fn invalid_url<E: Into<BoxError>>(e: E, url: &str) -> Error {
    configuration(format!("invalid URL \"{url}\": {}", e.into()))
}

/// Creates an `Error` for a header name or value that cannot be sent.
pub fn invalid_header<E: Into<BoxError>>(e: E, name: &str) -> Error {
    configuration(format!("invalid header \"{name}\": {}", e.into()))
}
