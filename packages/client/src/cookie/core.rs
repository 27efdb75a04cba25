//! HTTP Cookies

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use http::HeaderValue;
use http::header::{COOKIE, SET_COOKIE};
use url::Url;

use super::utils::{merge_cookies, validate_cookie};
use crate::http::{InternalRequest, Response};

/// Storage of cookies shared by the sends of one or more adapters.
pub trait CookieJar: Send + Sync {
    /// Returns `request` with the matching cookies merged into its `Cookie` header.
    fn populate(&self, request: &InternalRequest) -> InternalRequest;

    /// Stores the cookies `response` sets, scoped to the URL of `request`.
    fn extract(&self, request: &InternalRequest, response: &Response);
}

/// A single HTTP cookie, as stored in a [`Jar`].
#[derive(Clone)]
pub struct Cookie(cookie::Cookie<'static>);

impl Cookie {
    /// The name of the cookie.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// The value of the cookie.
    #[must_use]
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Returns true if the '`HttpOnly`' directive is enabled.
    #[must_use]
    pub fn http_only(&self) -> bool {
        self.0.http_only().unwrap_or(false)
    }

    /// Returns true if the 'Secure' directive is enabled.
    #[must_use]
    pub fn secure(&self) -> bool {
        self.0.secure().unwrap_or(false)
    }

    /// Returns the path directive of the cookie, if set.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.0.path()
    }

    /// Returns the domain directive of the cookie; `None` for host-only cookies.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.0.domain()
    }

    /// Get the Max-Age information.
    #[must_use]
    pub fn max_age(&self) -> Option<std::time::Duration> {
        self.0.max_age().and_then(|d| d.try_into().ok())
    }

    /// The cookie expiration time.
    #[must_use]
    pub fn expires(&self) -> Option<SystemTime> {
        match self.0.expires() {
            Some(cookie::Expiration::DateTime(offset)) => Some(SystemTime::from(offset)),
            None | Some(cookie::Expiration::Session) => None,
        }
    }
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The default [`CookieJar`], backed by an RFC 6265 cookie store.
///
/// Cloning is cheap and clones share the same store, so one jar can serve
/// several adapters. A cookie is keyed by (domain, path, name); storing a
/// cookie again under the same key replaces it, and expired cookies are never
/// sent.
#[derive(Debug, Default)]
pub struct Jar(Arc<RwLock<cookie_store::CookieStore>>);

impl Jar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie to this jar, as if `url` had sent it in a `Set-Cookie` header.
    ///
    /// # Example
    ///
    /// ```
    /// use http_adapter_client::cookie::Jar;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://yolo.local").unwrap();
    /// let jar = Jar::default();
    /// jar.add_cookie_str("foo=bar; Domain=yolo.local", &url);
    ///
    /// assert_eq!(jar.cookies(&url)[0].value(), "bar");
    /// ```
    pub fn add_cookie_str(&self, cookie: &str, url: &Url) {
        let cookies = parse_set_cookie(cookie).into_iter();
        if let Ok(mut store) = self.0.write() {
            store.store_response_cookies(cookies, url);
        }
    }

    /// Unexpired cookies that would be sent to `url`.
    #[must_use]
    pub fn cookies(&self, url: &Url) -> Vec<Cookie> {
        match self.0.read() {
            Ok(store) => store
                .matches(url)
                .into_iter()
                .map(|stored| {
                    let raw: &cookie::Cookie<'static> = stored;
                    Cookie(raw.clone())
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Number of unexpired cookies in the jar.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0
            .read()
            .map(|store| store.iter_unexpired().count())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut store) = self.0.write() {
            *store = cookie_store::CookieStore::default();
        }
    }

    fn request_values(&self, url: &Url) -> Vec<(String, String)> {
        match self.0.read() {
            Ok(store) => store
                .get_request_values(url)
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Clone for Jar {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl CookieJar for Jar {
    fn populate(&self, request: &InternalRequest) -> InternalRequest {
        let values = self.request_values(request.url());
        if values.is_empty() {
            return request.clone();
        }

        let existing = request
            .headers()
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        match HeaderValue::from_str(&merge_cookies(&existing, &values)) {
            Ok(header) => request.clone().with_header(COOKIE, header),
            Err(e) => {
                tracing::warn!(url = %request.url(), error = %e, "cookie header is not a valid header value, leaving request untouched");
                request.clone()
            }
        }
    }

    fn extract(&self, request: &InternalRequest, response: &Response) {
        let cookies: Vec<_> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| match value.to_str() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(url = %request.url(), "ignoring non-ASCII Set-Cookie header");
                    None
                }
            })
            .filter_map(parse_set_cookie)
            .collect();

        if cookies.is_empty() {
            return;
        }

        if let Ok(mut store) = self.0.write() {
            store.store_response_cookies(cookies.into_iter(), request.url());
        }
    }
}

fn parse_set_cookie(value: &str) -> Option<cookie::Cookie<'static>> {
    let parsed = match cookie::Cookie::parse(value) {
        Ok(parsed) => parsed.into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparsable Set-Cookie header");
            return None;
        }
    };

    if let Err(e) = validate_cookie(parsed.name(), parsed.value()) {
        tracing::warn!(error = %e, "ignoring invalid cookie");
        return None;
    }

    Some(parsed)
}
