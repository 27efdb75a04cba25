//! Bundled subscriber setters
//!
//! Subscribers sharing a priority run in the order they were added.

use std::sync::Arc;

use http_adapter_client::cookie::CookieJar;
use http_adapter_client::redirect::Policy;
use http_adapter_client::retry::RetryPolicy;
use http_adapter_client::subscriber::{
    BasicAuthSubscriber, CookieSubscriber, HistorySubscriber, LoggerSubscriber,
    RedirectSubscriber, RetrySubscriber, StatusCodeSubscriber, StopwatchSubscriber,
};
use http_adapter_client::telemetry::{Journal, TimerSink};

use super::core::{AdapterBuilder, configuration_error};

impl AdapterBuilder {
    /// Persists cookies in `jar` across sends.
    #[must_use]
    pub fn cookies(self, jar: impl CookieJar + 'static) -> Self {
        self.subscriber(Arc::new(CookieSubscriber::new(jar)))
    }

    /// Retries retryable failures under `policy`.
    ///
    /// An inconsistent policy is reported by `build`.
    #[must_use]
    pub fn retry(self, policy: RetryPolicy) -> Self {
        match policy.validate() {
            Ok(()) => self.subscriber(Arc::new(RetrySubscriber::new(policy))),
            Err(message) => self.fail(configuration_error(format!("invalid retry policy: {message}"))),
        }
    }

    /// Follows redirects under `policy`.
    #[must_use]
    pub fn redirects(self, policy: Policy) -> Self {
        self.subscriber(Arc::new(RedirectSubscriber::new(policy)))
    }

    /// Registers a preconfigured redirect subscriber (strict mode, `Referer`).
    #[must_use]
    pub fn redirect_subscriber(self, subscriber: RedirectSubscriber) -> Self {
        self.subscriber(Arc::new(subscriber))
    }

    /// Fails sends answered with a status of 400 or more.
    #[must_use]
    pub fn status_code_errors(self) -> Self {
        self.subscriber(Arc::new(StatusCodeSubscriber::new()))
    }

    /// Times every send into `sink`.
    #[must_use]
    pub fn stopwatch(self, sink: Arc<dyn TimerSink>) -> Self {
        self.subscriber(Arc::new(StopwatchSubscriber::new(sink)))
    }

    /// Logs outcomes through `tracing`.
    #[must_use]
    pub fn logging(self) -> Self {
        self.subscriber(Arc::new(LoggerSubscriber::new()))
    }

    /// Records completed sends in `journal`.
    #[must_use]
    pub fn history(self, journal: Arc<Journal>) -> Self {
        self.subscriber(Arc::new(HistorySubscriber::new(journal)))
    }

    /// Authenticates every request with HTTP basic authentication.
    ///
    /// Credentials that cannot be encoded are reported by `build`.
    #[must_use]
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        match BasicAuthSubscriber::new(username, password) {
            Ok(subscriber) => self.subscriber(Arc::new(subscriber)),
            Err(error) => self.fail(error),
        }
    }
}
