//! Normalized request that travels through the event pipeline

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Version};
use url::Url;

use super::parameters::Parameters;
use super::request::Request;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one logical call.
///
/// Requests derived from another one (cookie population, retry, redirect
/// follow-ups) keep its id, so every response or error can be traced back to
/// the call that started it regardless of the order a backend answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request body: raw bytes or form fields, never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Raw(Bytes),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Empty => true,
            RequestBody::Raw(bytes) => bytes.is_empty(),
            RequestBody::Form(fields) => fields.is_empty(),
        }
    }

    /// Encodes the body for the wire; form fields are url-encoded.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        match self {
            RequestBody::Empty => Bytes::new(),
            RequestBody::Raw(bytes) => bytes.clone(),
            RequestBody::Form(fields) => serde_urlencoded::to_string(fields)
                .map(Bytes::from)
                .unwrap_or_default(),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        if bytes.is_empty() {
            RequestBody::Empty
        } else {
            RequestBody::Raw(bytes)
        }
    }
}

/// Request handed to backends after normalization.
#[derive(Debug, Clone)]
pub struct InternalRequest {
    id: RequestId,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: RequestBody,
    version: Version,
    parameters: Parameters,
    original: Option<Arc<Request>>,
}

impl InternalRequest {
    /// Starts a new logical call.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            id: RequestId::next(),
            method,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            version: Version::HTTP_11,
            parameters: Parameters::new(),
            original: None,
        }
    }

    /// Starts a new logical call from a caller request, keeping a reference to it.
    #[must_use]
    pub fn from_request(request: Request) -> Self {
        let original = Arc::new(request.clone());
        let (method, url, headers, body, version, parameters) = request.into_parts();
        Self {
            id: RequestId::next(),
            method,
            url,
            headers,
            body: RequestBody::from(body),
            version,
            parameters,
            original: Some(original),
        }
    }

    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
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
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The caller request this one was normalized from, if any.
    #[must_use]
    pub fn original(&self) -> Option<&Arc<Request>> {
        self.original.as_ref()
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Replaces every value of `name` with `value`.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Appends `value` to the values already present for `name`.
    #[must_use]
    pub fn with_added_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn without_header(mut self, name: &HeaderName) -> Self {
        self.headers.remove(name);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Drops the body together with the headers describing it.
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.body = RequestBody::Empty;
        self.headers.remove(CONTENT_TYPE);
        self.headers.remove(CONTENT_LENGTH);
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }
}
