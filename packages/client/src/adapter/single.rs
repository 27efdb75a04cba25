//! Single-request pipeline and the per-method shortcuts

use std::sync::Arc;

use bytes::Bytes;
use http::Method;

use super::HttpAdapter;
use crate::error::{self, Error, Result};
use crate::event::{ExceptionEvent, PostSendEvent, PreSendEvent};
use crate::http::{InternalRequest, Request, Response};

impl HttpAdapter {
    /// Builds a request from its parts and sends it.
    ///
    /// Relative `url`s are resolved against the configured base URL.
    ///
    /// # Errors
    ///
    /// Configuration errors for unusable URLs or headers (no event is
    /// published), otherwise whatever the pipeline could not recover from.
    pub fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        let request = self.factory.create_request(method, url, headers, body)?;
        self.send_request(request)
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response> {
        self.send(Method::GET, url, headers, Bytes::new())
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn head(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response> {
        self.send(Method::HEAD, url, headers, Bytes::new())
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn trace(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response> {
        self.send(Method::TRACE, url, headers, Bytes::new())
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn options(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(Method::OPTIONS, url, headers, body)
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn delete(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(Method::DELETE, url, headers, body)
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(Method::POST, url, headers, body)
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn put(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(Method::PUT, url, headers, body)
    }

    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn patch(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(Method::PATCH, url, headers, body)
    }

    /// Sends `fields` url-encoded as a POST body.
    ///
    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        fields: Vec<(String, String)>,
    ) -> Result<Response> {
        let request = self
            .factory
            .create_form_request(Method::POST, url, headers, fields)?;
        self.send_internal_request(request)
    }

    /// Normalizes a caller request and sends it.
    ///
    /// # Errors
    ///
    /// See [`HttpAdapter::send`].
    pub fn send_request(&self, request: Request) -> Result<Response> {
        let request = self.factory.create_internal_request(request)?;
        self.send_internal_request(request)
    }

    /// Runs `request` through `PreSend`, the backend, then `PostSend` or
    /// `Exception`.
    ///
    /// A response supplied during `PreSend` is returned as is: the backend is
    /// not called and `PostSend` is not published. An error left on
    /// `PostSend` is published as `Exception`, like a transport failure.
    ///
    /// # Errors
    ///
    /// Returns the error left on the `PostSend` or `Exception` event, or the
    /// first error a handler returned.
    pub fn send_internal_request(&self, request: InternalRequest) -> Result<Response> {
        let mut event = PreSendEvent::new(self, request);
        self.dispatcher.dispatch(&mut event)?;
        let (request, response, error) = event.into_parts();

        if let Some(error) = error {
            tracing::debug!(
                adapter = self.name(),
                request = %request.id(),
                "send aborted before reaching the backend"
            );
            let error = self.bind_error(error, request);
            return self.handle_error(error);
        }

        let request = Arc::new(request);

        if let Some(response) = response {
            tracing::debug!(
                adapter = self.name(),
                request = %request.id(),
                status = response.status().as_u16(),
                "send short-circuited"
            );
            return Ok(match response.request() {
                Some(_) => response,
                None => response.with_request(request),
            });
        }

        tracing::debug!(
            adapter = self.name(),
            request = %request.id(),
            method = %request.method(),
            url = %request.url(),
            "sending request"
        );

        match self.backend.send(&request, &self.config) {
            Ok(raw) => {
                let response = self.factory.create_response(raw, Arc::clone(&request));
                let mut event = PostSendEvent::new(self, request, response);
                self.dispatcher.dispatch(&mut event)?;
                match event.into_outcome() {
                    Ok(response) => Ok(response),
                    Err(error) => self.handle_error(error),
                }
            }
            Err(e) => {
                let error = error::transport(e, self.name(), request);
                self.handle_error(error)
            }
        }
    }

    /// Publishes `Exception`; a response attached by a listener wins.
    fn handle_error(&self, error: Error) -> Result<Response> {
        tracing::debug!(adapter = self.name(), error = %error.cause(), "handling send failure");
        let mut event = ExceptionEvent::new(self, error);
        self.dispatcher.dispatch(&mut event)?;
        event.into_outcome()
    }

    fn bind_error(&self, mut error: Error, request: InternalRequest) -> Error {
        if error.adapter().is_none() {
            error = error.with_adapter(self.name());
        }
        if error.request().is_none() {
            error = error.with_request(Arc::new(request));
        }
        error
    }
}
