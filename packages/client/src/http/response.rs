//! HTTP response value bound to the request that produced it

use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, StatusCode, Version};

use super::internal::{InternalRequest, RequestId};
use super::parameters::Parameters;

/// Response as produced by a backend, before the adapter binds it to its request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub version: Version,
    pub status: StatusCode,
    /// Reason phrase; may be empty (HTTP/2 and later have none).
    pub reason: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::HTTP_11,
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }
}

/// HTTP response.
///
/// Immutable once built; listeners that want a different outcome substitute
/// a whole new `Response` into the event.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    reason: String,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
    parameters: Parameters,
    request: Option<Arc<InternalRequest>>,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self::from_raw(RawResponse::new(status), None)
    }

    /// Binds backend output to the request that produced it.
    #[must_use]
    pub fn from_raw(raw: RawResponse, request: Option<Arc<InternalRequest>>) -> Self {
        Self {
            status: raw.status,
            reason: raw.reason,
            version: raw.version,
            headers: raw.headers,
            body: raw.body,
            parameters: Parameters::new(),
            request,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The request this response answers.
    #[must_use]
    pub fn request(&self) -> Option<&Arc<InternalRequest>> {
        self.request.as_ref()
    }

    /// Id of the logical call this response belongs to.
    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        self.request.as_ref().map(|request| request.id())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn is_redirection(&self) -> bool {
        self.status.is_redirection()
    }

    #[must_use]
    pub fn with_request(mut self, request: Arc<InternalRequest>) -> Self {
        self.request = Some(request);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(key, value);
        self
    }
}
