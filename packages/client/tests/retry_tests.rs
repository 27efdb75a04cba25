//! Tests for re-sending failed requests

mod common;

use std::sync::Arc;

use common::{MockBackend, Recorder, adapter, entries, fail, new_log, ok, status};
use http_adapter_client::error::{self, Result};
use http_adapter_client::http::parameters::RETRY_COUNT;
use http_adapter_client::prelude::*;

fn get(url: &str) -> InternalRequest {
    InternalRequest::new(Method::GET, Url::parse(url).expect("test URL should parse"))
}

/// Aborts every request during `PreSend` with a configuration error.
struct Firewall;

impl Subscriber for Firewall {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventKind::PreSend, "block", 500)]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        event.set_error(error::configuration("blocked"));
        Ok(())
    }
}

fn flaky() -> Arc<MockBackend> {
    Arc::new(
        MockBackend::new()
            .route("http://example.com/flaky", fail("reset"))
            .route("http://example.com/flaky", fail("reset"))
            .route("http://example.com/flaky", ok()),
    )
}

#[test]
fn test_transient_failures_are_retried_until_success() {
    let backend = flaky();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));

    let response = adapter.get("http://example.com/flaky", &[]).expect("third attempt succeeds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.call_count(), 3);
    let request = response.request().expect("response is bound to its request");
    assert_eq!(request.parameters().get_as::<u32>(RETRY_COUNT), Some(2));
}

#[test]
fn test_retries_keep_the_request_id() {
    let backend = flaky();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));

    adapter.get("http://example.com/flaky", &[]).expect("third attempt succeeds");

    let calls = backend.calls();
    assert!(calls.iter().all(|call| call.id() == calls[0].id()));
}

#[test]
fn test_gives_up_after_max_attempts() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/down", fail("refused")));
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));

    let err = adapter.get("http://example.com/down", &[]).expect_err("every attempt fails");

    assert!(err.is_transport());
    assert_eq!(backend.call_count(), 3);
    let request = err.request().expect("failed request is attached");
    assert_eq!(request.parameters().get_as::<u32>(RETRY_COUNT), Some(2));
}

#[test]
fn test_no_retry_policy_sends_once() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/down", fail("refused")));
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::no_retry())));

    adapter.get("http://example.com/down", &[]).expect_err("no retry");

    assert_eq!(backend.call_count(), 1);
}

#[test]
fn test_configuration_errors_are_not_retried() {
    let backend = Arc::new(MockBackend::new());
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Firewall));
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));
    adapter.subscribe(Arc::new(Recorder::new("r", 1000, &log).only(&[EventKind::PreSend])));

    let err = adapter.get("http://example.com/", &[]).expect_err("blocked");

    assert!(err.is_configuration());
    assert_eq!(entries(&log), vec!["r:pre_send"]);
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn test_batch_failures_are_retried() {
    let backend = flaky();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));

    let flaky_request = get("http://example.com/flaky");
    let flaky_id = flaky_request.id();
    let batch = adapter
        .send_internal_requests(vec![flaky_request, get("http://example.com/steady")])
        .expect("batch completes");

    assert!(batch.is_success());
    assert_eq!(batch.responses().len(), 2);
    assert!(batch.response_for(flaky_id).is_some());
    assert_eq!(backend.batch_count(), 3);
}

#[test]
fn test_batch_server_errors_are_retried_after_status_validation() {
    let backend = Arc::new(
        MockBackend::new()
            .route("http://example.com/busy", status(503))
            .route("http://example.com/busy", ok()),
    );
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(StatusCodeSubscriber::new()));
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(2))));

    let batch = adapter
        .send_internal_requests(vec![get("http://example.com/busy")])
        .expect("batch completes");

    assert!(batch.is_success());
    assert_eq!(batch.responses()[0].status(), StatusCode::OK);
    assert_eq!(backend.call_count(), 2);
}

#[test]
fn test_server_errors_are_retried_after_status_validation() {
    let backend = Arc::new(
        MockBackend::new()
            .route("http://example.com/busy", status(503))
            .route("http://example.com/busy", ok()),
    );
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(StatusCodeSubscriber::new()));
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(2))));

    let response = adapter.get("http://example.com/busy", &[]).expect("second attempt succeeds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.call_count(), 2);
    let request = response.request().expect("response is bound to its request");
    assert_eq!(request.parameters().get_as::<u32>(RETRY_COUNT), Some(1));
}

#[test]
fn test_status_errors_are_published_as_exceptions() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/missing", status(404)));
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(StatusCodeSubscriber::new()));
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));
    adapter.subscribe(Arc::new(
        Recorder::new("r", 1000, &log).only(&[EventKind::PostSend, EventKind::Exception]),
    ));

    let err = adapter.get("http://example.com/missing", &[]).expect_err("404 is not retried");

    assert!(err.is_application());
    assert_eq!(err.cause(), "Status code: 404");
    assert_eq!(backend.call_count(), 1);
    assert_eq!(entries(&log), vec!["r:post_send", "r:exception"]);
}

#[test]
fn test_batch_client_errors_are_not_retried() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/missing", status(404)));
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(StatusCodeSubscriber::new()));
    adapter.subscribe(Arc::new(RetrySubscriber::new(RetryPolicy::immediate(3))));

    let batch = adapter
        .send_internal_requests(vec![get("http://example.com/missing")])
        .expect("batch completes");

    assert_eq!(batch.errors().len(), 1);
    assert_eq!(backend.call_count(), 1);
}
