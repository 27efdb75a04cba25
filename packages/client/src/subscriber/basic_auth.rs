//! HTTP basic authentication

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use http::header::AUTHORIZATION;
use url::Url;

use crate::error::{self, Result};
use crate::event::{EventKind, MultiRequestCreatedEvent, PreSendEvent, Subscriber, Subscription};
use crate::http::InternalRequest;

type Matcher = Box<dyn Fn(&Url) -> bool + Send + Sync>;

/// Adds an `Authorization: Basic` header to outgoing requests.
///
/// Without a matcher every request is authenticated.
pub struct BasicAuthSubscriber {
    header: HeaderValue,
    matcher: Option<Matcher>,
}

impl BasicAuthSubscriber {
    pub const PRIORITY: i32 = 300;

    /// # Errors
    ///
    /// Returns a configuration error when the credentials cannot be encoded
    /// in a header.
    pub fn new(username: &str, password: &str) -> Result<Self> {
        Ok(Self {
            header: basic_auth_header(username, password)?,
            matcher: None,
        })
    }

    /// Authenticates only requests to `host`.
    #[must_use]
    pub fn for_host(self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.with_matcher(move |url| url.host_str() == Some(host.as_str()))
    }

    /// Authenticates only requests whose URL satisfies `matcher`.
    #[must_use]
    pub fn with_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&Url) -> bool + Send + Sync + 'static,
    {
        self.matcher = Some(Box::new(matcher));
        self
    }

    fn matches(&self, url: &Url) -> bool {
        self.matcher.as_ref().is_none_or(|matcher| matcher(url))
    }

    fn authenticate(&self, request: &InternalRequest) -> Option<InternalRequest> {
        self.matches(request.url())
            .then(|| request.clone().with_header(AUTHORIZATION, self.header.clone()))
    }
}

/// `Basic base64(username:password)`, marked sensitive.
///
/// # Errors
///
/// Returns a configuration error when the result is not a valid header value.
pub fn basic_auth_header(username: &str, password: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    let mut header = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| error::invalid_header(e, AUTHORIZATION.as_str()))?;
    header.set_sensitive(true);
    Ok(header)
}

impl Subscriber for BasicAuthSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PreSend, "on_pre_send", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestCreated, "on_multi_request_created", Self::PRIORITY),
        ]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        if let Some(request) = self.authenticate(event.request()) {
            event.set_request(request);
        }
        Ok(())
    }

    fn on_multi_request_created(&self, event: &mut MultiRequestCreatedEvent<'_>) -> Result<()> {
        for request in event.requests_mut() {
            if let Some(authenticated) = self.authenticate(request) {
                *request = authenticated;
            }
        }
        Ok(())
    }
}
