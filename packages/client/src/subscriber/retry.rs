//! Re-sending failed requests

use std::thread;

use crate::error::{Error, Result};
use crate::event::{
    Event, EventKind, ExceptionEvent, MultiRequestErroredEvent, Subscriber, Subscription,
};
use crate::http::InternalRequest;
use crate::http::parameters::RETRY_COUNT;
use crate::retry::RetryPolicy;

/// Re-sends requests that failed with a retryable error.
///
/// The number of re-sends already made for a logical call rides in the
/// `retry_count` request parameter. Re-sends go through the full pipeline,
/// so later failures are retried by the nested send until the policy gives up.
#[derive(Debug, Clone, Default)]
pub struct RetrySubscriber {
    policy: RetryPolicy,
}

impl RetrySubscriber {
    pub const PRIORITY: i32 = 0;

    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The request to send next when `error` deserves another attempt.
    fn next_attempt(&self, error: &Error) -> Option<(InternalRequest, u32)> {
        if !self.policy.is_retryable_error(error) {
            return None;
        }

        let request = error.request()?;
        let retries = request.parameters().get_as::<u32>(RETRY_COUNT).unwrap_or(0);
        if !self.policy.allows_retry(retries) {
            tracing::debug!(
                request = %request.id(),
                retries,
                "retry budget exhausted"
            );
            return None;
        }

        let attempt = retries + 1;
        let retry = request.as_ref().clone().with_parameter(RETRY_COUNT, attempt);
        Some((retry, attempt))
    }
}

impl Subscriber for RetrySubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::Exception, "on_exception", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestErrored, "on_multi_request_errored", Self::PRIORITY),
        ]
    }

    fn on_exception(&self, event: &mut ExceptionEvent<'_>) -> Result<()> {
        let Some((request, attempt)) = self.next_attempt(event.error()) else {
            return Ok(());
        };

        let delay = self.policy.calculate_delay(attempt);
        tracing::debug!(
            adapter = event.adapter().name(),
            request = %request.id(),
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "retrying request"
        );
        thread::sleep(delay);

        match event.adapter().send_internal_request(request) {
            Ok(response) => event.set_response(response),
            Err(error) => event.set_error(error),
        }
        Ok(())
    }

    fn on_multi_request_errored(&self, event: &mut MultiRequestErroredEvent<'_>) -> Result<()> {
        let errors = std::mem::take(event.errors_mut());
        let mut kept = Vec::with_capacity(errors.len());
        let mut retries = Vec::new();
        let mut delay = std::time::Duration::ZERO;

        for error in errors {
            match self.next_attempt(&error) {
                Some((request, attempt)) => {
                    delay = delay.max(self.policy.calculate_delay(attempt));
                    retries.push(request);
                }
                None => kept.push(error),
            }
        }
        event.set_errors(kept);

        if retries.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            adapter = event.adapter().name(),
            requests = retries.len(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "retrying failed batch requests"
        );
        thread::sleep(delay);

        let (responses, errors) = event.adapter().send_internal_requests(retries)?.into_parts();
        for response in responses {
            event.add_response(response);
        }
        for error in errors {
            event.add_error(error);
        }
        Ok(())
    }
}
