//! Following 3xx responses

use std::sync::Arc;

use hashbrown::HashMap;
use http::header::{LOCATION, REFERER};
use http::{Method, StatusCode};
use url::Url;

use crate::error::{self, Result};
use crate::event::{
    Event, EventKind, MultiRequestSentEvent, PostSendEvent, Subscriber, Subscription,
};
use crate::http::parameters::{EFFECTIVE_URL, REDIRECT_COUNT, REDIRECT_HISTORY};
use crate::http::{InternalRequest, RequestId, Response};
use crate::redirect::{ActionKind, Policy, make_referer, remove_sensitive_headers};

/// Follows redirects by re-sending through the adapter.
///
/// Follow-up requests keep the id of the logical call. URLs already visited
/// ride in the `redirect_history` request parameter; the final response gets
/// `effective_url` and `redirect_count` parameters.
#[derive(Debug, Default)]
pub struct RedirectSubscriber {
    policy: Policy,
    strict: bool,
    referer: bool,
}

/// What to do with one redirect response.
enum Step {
    Keep,
    Follow(InternalRequest, usize),
    Fail(Box<dyn std::error::Error + Send + Sync>),
}

impl RedirectSubscriber {
    pub const PRIORITY: i32 = 0;

    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            strict: false,
            referer: false,
        }
    }

    /// Keeps the method of `POST` requests on 301 and 302.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Adds a `Referer` header to follow-up requests.
    #[must_use]
    pub fn referer(mut self, referer: bool) -> Self {
        self.referer = referer;
        self
    }

    fn step(&self, request: &InternalRequest, response: &Response) -> Step {
        if !response.is_redirection() {
            return Step::Keep;
        }
        let Some(location) = response.header(LOCATION.as_str()) else {
            return Step::Keep;
        };

        let next = match request.url().join(location) {
            Ok(next) if matches!(next.scheme(), "http" | "https") => next,
            Ok(next) => {
                tracing::debug!(location = %next, "not following redirect to a non-http URL");
                return Step::Keep;
            }
            Err(e) => {
                tracing::warn!(location, error = %e, "ignoring unparsable Location header");
                return Step::Keep;
            }
        };

        let mut previous: Vec<Url> = request
            .parameters()
            .get_as::<Vec<String>>(REDIRECT_HISTORY)
            .unwrap_or_default()
            .iter()
            .filter_map(|url| Url::parse(url).ok())
            .collect();
        previous.push(request.url().clone());

        match self.policy.check(response.status(), &next, &previous) {
            ActionKind::Follow => {
                let redirects = previous.len();
                Step::Follow(self.follow_up(request, response.status(), next, &previous), redirects)
            }
            ActionKind::Stop => Step::Keep,
            ActionKind::Error(e) => Step::Fail(e),
        }
    }

    fn follow_up(
        &self,
        request: &InternalRequest,
        status: StatusCode,
        next: Url,
        previous: &[Url],
    ) -> InternalRequest {
        let mut headers = request.headers().clone();
        remove_sensitive_headers(&mut headers, &next, previous);

        if self.referer {
            if let Some(referer) = make_referer(&next, request.url()) {
                headers.insert(REFERER, referer);
            }
        }

        let history: Vec<&str> = previous.iter().map(Url::as_str).collect();
        let mut follow_up = request
            .clone()
            .with_headers(headers)
            .with_url(next)
            .with_parameter(REDIRECT_HISTORY, history);

        let switch_to_get = match status {
            StatusCode::SEE_OTHER => *request.method() != Method::HEAD,
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
                *request.method() == Method::POST && !self.strict
            }
            _ => false,
        };
        if switch_to_get {
            follow_up = follow_up.with_method(Method::GET).without_body();
        }

        follow_up
    }
}

/// Stamps the chain summary on the final response unless a deeper hop did.
fn finish(response: Response, redirects: usize) -> Response {
    if response.parameters().contains(EFFECTIVE_URL) {
        return response;
    }
    let effective_url = response
        .request()
        .map(|request| request.url().to_string())
        .unwrap_or_default();
    response
        .with_parameter(EFFECTIVE_URL, effective_url)
        .with_parameter(REDIRECT_COUNT, redirects)
}

impl Subscriber for RedirectSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PostSend, "on_post_send", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestSent, "on_multi_request_sent", Self::PRIORITY),
        ]
    }

    fn on_post_send(&self, event: &mut PostSendEvent<'_>) -> Result<()> {
        if event.has_error() {
            return Ok(());
        }

        let request = Arc::clone(event.request());
        match self.step(&request, event.response()) {
            Step::Keep => {}
            Step::Fail(e) => {
                let error = error::redirect(e, event.adapter().name(), request, event.response().clone());
                event.set_error(error);
            }
            Step::Follow(follow_up, redirects) => {
                tracing::debug!(
                    request = %follow_up.id(),
                    status = event.response().status().as_u16(),
                    location = %follow_up.url(),
                    "following redirect"
                );
                match event.adapter().send_internal_request(follow_up) {
                    Ok(response) => event.set_response(finish(response, redirects)),
                    Err(error) => event.set_error(error),
                }
            }
        }
        Ok(())
    }

    fn on_multi_request_sent(&self, event: &mut MultiRequestSentEvent<'_>) -> Result<()> {
        let adapter = event.adapter();
        let responses = std::mem::take(event.responses_mut());
        let mut kept = Vec::with_capacity(responses.len());
        let mut follow_ups = Vec::new();
        let mut redirects: HashMap<RequestId, usize> = HashMap::new();
        let mut failed = Vec::new();

        for response in responses {
            let Some(request) = response.request().cloned() else {
                kept.push(response);
                continue;
            };
            match self.step(&request, &response) {
                Step::Keep => kept.push(response),
                Step::Fail(e) => failed.push(error::redirect(e, adapter.name(), request, response)),
                Step::Follow(follow_up, count) => {
                    redirects.insert(follow_up.id(), count);
                    follow_ups.push(follow_up);
                }
            }
        }

        event.set_responses(kept);
        for error in failed {
            event.add_error(error);
        }

        if follow_ups.is_empty() {
            return Ok(());
        }

        let (responses, errors) = adapter.send_internal_requests(follow_ups)?.into_parts();
        for response in responses {
            let count = response
                .request_id()
                .and_then(|id| redirects.get(&id).copied())
                .unwrap_or_default();
            event.add_response(finish(response, count));
        }
        for error in errors {
            event.add_error(error);
        }
        Ok(())
    }
}
