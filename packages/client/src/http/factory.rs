//! Construction of request and response values
//!
//! Every request the adapter sends is built here, so URL resolution and the
//! default headers are applied in one place and invalid input is rejected
//! before any event is published.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, StatusCode, Version};
use url::Url;

use super::headers::header_map;
use super::internal::{InternalRequest, RequestBody};
use super::request::Request;
use super::response::{RawResponse, Response};
use crate::config::AdapterConfig;
use crate::error::{self, Error};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct MessageFactory {
    base_url: Option<Url>,
    protocol_version: Version,
    user_agent: Option<HeaderValue>,
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::from_config(&AdapterConfig::default())
    }
}

impl MessageFactory {
    #[must_use]
    pub fn from_config(config: &AdapterConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            protocol_version: config.protocol_version,
            user_agent: HeaderValue::from_str(&config.user_agent).ok(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Parses `url`, resolving it against the base URL when it is relative.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed URLs, relative URLs without
    /// a base URL, and schemes other than `http`/`https`.
    pub fn resolve_url(&self, url: &str) -> Result<Url, Error> {
        let resolved = match Url::parse(url) {
            Ok(absolute) => absolute,
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.base_url {
                Some(ref base) => base.join(url).map_err(|e| error::invalid_url(e, url))?,
                None => return Err(error::invalid_url("relative URL without a base URL", url)),
            },
            Err(e) => return Err(error::invalid_url(e, url)),
        };

        match resolved.scheme() {
            "http" | "https" if resolved.has_host() => Ok(resolved),
            "http" | "https" => Err(error::invalid_url("missing host", url)),
            other => Err(error::invalid_url(format!("unsupported scheme \"{other}\""), url)),
        }
    }

    /// Builds a caller request.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid URLs or headers.
    pub fn create_request(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Request, Error> {
        let url = self.resolve_url(url)?;
        let headers = header_map(headers)?;
        Ok(Request::new(method, url)
            .with_headers(headers)
            .with_body(body)
            .with_version(self.protocol_version))
    }

    /// Builds an internal request with form fields as body.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid URLs or headers.
    pub fn create_form_request(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        fields: Vec<(String, String)>,
    ) -> Result<InternalRequest, Error> {
        let url = self.resolve_url(url)?;
        let headers = header_map(headers)?;
        let request = InternalRequest::new(method, url)
            .with_headers(headers)
            .with_body(RequestBody::Form(fields))
            .with_version(self.protocol_version);
        Ok(self.normalize(request))
    }

    /// Normalizes a caller request into the request handed to the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the request URL cannot be sent.
    pub fn create_internal_request(&self, request: Request) -> Result<InternalRequest, Error> {
        match request.url().scheme() {
            "http" | "https" => {}
            other => {
                return Err(error::invalid_url(
                    format!("unsupported scheme \"{other}\""),
                    request.url().as_str(),
                ));
            }
        }
        Ok(self.normalize(InternalRequest::from_request(request)))
    }

    /// Binds backend output to the request that produced it.
    #[must_use]
    pub fn create_response(&self, raw: RawResponse, request: Arc<InternalRequest>) -> Response {
        Response::from_raw(raw, Some(request))
    }

    /// Builds a synthetic response, e.g. for listeners that short-circuit a send.
    #[must_use]
    pub fn create_synthetic_response(
        &self,
        status: StatusCode,
        headers: HeaderMap,
        body: impl Into<Bytes>,
        request: Arc<InternalRequest>,
    ) -> Response {
        let mut raw = RawResponse::new(status)
            .with_body(body)
            .with_version(self.protocol_version);
        raw.headers = headers;
        Response::from_raw(raw, Some(request))
    }

    fn normalize(&self, mut request: InternalRequest) -> InternalRequest {
        if request.headers().get(USER_AGENT).is_none() {
            if let Some(ref user_agent) = self.user_agent {
                request = request.with_header(USER_AGENT, user_agent.clone());
            }
        }

        if matches!(request.body(), RequestBody::Form(_)) && request.headers().get(CONTENT_TYPE).is_none() {
            request = request.with_header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }

        request
    }
}
