//! Tests for the single-request pipeline: event order, short-circuit,
//! recovery and error reporting

mod common;

use std::sync::Arc;

use bytes::Bytes;
use common::{MockBackend, Recorder, adapter, entries, fail, new_log, status};
use http_adapter_client::error::{self, Result};
use http_adapter_client::prelude::*;

/// Answers every request during `PreSend`.
struct Cache;

impl Subscriber for Cache {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventKind::PreSend, "serve_cached", 500)]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        event.set_response(Response::new(StatusCode::NOT_MODIFIED).with_body("cached"));
        Ok(())
    }
}

/// Aborts every request during `PreSend`.
struct Firewall;

impl Subscriber for Firewall {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventKind::PreSend, "block", 500)]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        event.set_error(error::configuration("blocked by firewall"));
        Ok(())
    }
}

/// Answers failed sends with a fallback response.
struct Fallback;

impl Subscriber for Fallback {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventKind::Exception, "fallback", 0)]
    }

    fn on_exception(&self, event: &mut ExceptionEvent<'_>) -> Result<()> {
        let request = event.request().cloned().expect("failed request is attached");
        event.set_response(Response::new(StatusCode::OK).with_body("fallback").with_request(request));
        Ok(())
    }
}

/// Rewrites the request path and adds a header.
struct Rewriter;

impl Subscriber for Rewriter {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventKind::PreSend, "rewrite", 0)]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        let url = event.request().url().join("/rewritten").expect("test URL should join");
        let request = event
            .request()
            .clone()
            .with_url(url)
            .with_header(HeaderName::from_static("x-rewritten"), HeaderValue::from_static("1"));
        event.set_request(request);
        Ok(())
    }
}

#[test]
fn test_successful_send_publishes_pre_and_post_send() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/ok", common::body("hello")));
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Recorder::new("r", 0, &log)));

    let response = adapter.get("http://example.com/ok", &[]).expect("send succeeds");

    assert_eq!(response.text(), "hello");
    assert_eq!(entries(&log), vec!["r:pre_send", "r:post_send"]);
    let request = response.request().expect("response is bound to its request");
    assert_eq!(request.url().as_str(), "http://example.com/ok");
    assert_eq!(backend.last_call().id(), request.id());
}

#[test]
fn test_short_circuit_bypasses_backend_and_post_send() {
    let backend = Arc::new(MockBackend::new());
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Cache));
    adapter.subscribe(Arc::new(Recorder::new("r", 0, &log)));

    let response = adapter.get("http://example.com/", &[]).expect("short-circuit succeeds");

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.text(), "cached");
    assert!(response.request().is_some());
    assert_eq!(backend.call_count(), 0);
    assert_eq!(entries(&log), vec!["r:pre_send"]);
}

#[test]
fn test_pre_send_error_goes_through_exception() {
    let backend = Arc::new(MockBackend::new());
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Firewall));
    adapter.subscribe(Arc::new(Recorder::new("r", 0, &log)));

    let err = adapter.get("http://example.com/", &[]).expect_err("send is blocked");

    assert_eq!(backend.call_count(), 0);
    assert_eq!(entries(&log), vec!["r:pre_send", "r:exception"]);
    assert!(err.request().is_some());
    assert_eq!(err.adapter(), Some("mock"));
}

#[test]
fn test_transport_error_reports_url_adapter_and_cause() {
    let backend = Arc::new(MockBackend::named("curl").route("http://example.com/down", fail("connection refused")));
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Recorder::new("r", 0, &log)));

    let err = adapter.get("http://example.com/down", &[]).expect_err("backend fails");

    assert!(err.is_transport());
    assert_eq!(entries(&log), vec!["r:pre_send", "r:exception"]);
    assert_eq!(
        err.to_string(),
        "An error occurred when fetching the URL \"http://example.com/down\" with the adapter \"curl\" (\"could not connect: connection refused\")."
    );
}

#[test]
fn test_timeout_is_classified() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/slow", common::Outcome::Timeout));
    let adapter = adapter(&backend);

    let err = adapter.get("http://example.com/slow", &[]).expect_err("backend times out");

    assert!(err.is_transport());
    assert!(err.is_timeout());
}

#[test]
fn test_exception_listener_heals_the_send() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/down", fail("reset")));
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Fallback));

    let response = adapter.get("http://example.com/down", &[]).expect("send is healed");

    assert_eq!(response.text(), "fallback");
}

#[test]
fn test_pre_send_replacement_reaches_backend() {
    let backend = Arc::new(MockBackend::new());
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Rewriter));

    let response = adapter.get("http://example.com/original", &[]).expect("send succeeds");

    let sent = backend.last_call();
    assert_eq!(sent.url().path(), "/rewritten");
    assert_eq!(sent.header("x-rewritten"), Some("1"));
    assert_eq!(response.request().map(|request| request.url().path().to_string()), Some("/rewritten".to_string()));
}

#[test]
fn test_invalid_url_fails_before_any_event() {
    let backend = Arc::new(MockBackend::new());
    let log = new_log();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(Recorder::new("r", 0, &log)));

    let err = adapter.get("/relative/without/base", &[]).expect_err("no base URL");

    assert!(err.is_configuration());
    assert!(entries(&log).is_empty());
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn test_invalid_header_is_a_configuration_error() {
    let backend = Arc::new(MockBackend::new());
    let adapter = adapter(&backend);

    let err = adapter
        .get("http://example.com/", &[("bad header", "x")])
        .expect_err("header name has a space");

    assert!(err.is_configuration());
}

#[test]
fn test_base_url_and_default_headers_are_applied() {
    let backend = Arc::new(MockBackend::new());
    let config = AdapterConfig::default()
        .with_base_url(Url::parse("http://api.example.com/v1/").expect("test URL should parse"))
        .with_user_agent("suite/1.0");
    let adapter = HttpAdapter::with_config(Arc::clone(&backend), config).expect("valid config");

    adapter
        .post("users", &[("Content-Type", "application/json")], Bytes::from_static(b"{}"))
        .expect("send succeeds");

    let sent = backend.last_call();
    assert_eq!(sent.url().as_str(), "http://api.example.com/v1/users");
    assert_eq!(*sent.method(), Method::POST);
    assert_eq!(sent.header("user-agent"), Some("suite/1.0"));
    assert_eq!(sent.body(), &RequestBody::Raw(Bytes::from_static(b"{}")));
}

#[test]
fn test_post_form_encodes_fields() {
    let backend = Arc::new(MockBackend::new());
    let adapter = adapter(&backend);

    adapter
        .post_form(
            "http://example.com/login",
            &[],
            vec![("user".to_string(), "ada".to_string()), ("note".to_string(), "a&b".to_string())],
        )
        .expect("send succeeds");

    let sent = backend.last_call();
    assert_eq!(sent.header("content-type"), Some("application/x-www-form-urlencoded"));
    assert_eq!(sent.body().to_bytes(), Bytes::from_static(b"user=ada&note=a%26b"));
}

#[test]
fn test_every_method_shortcut_uses_its_verb() {
    let backend = Arc::new(MockBackend::new());
    let adapter = adapter(&backend);
    let url = "http://example.com/";

    adapter.get(url, &[]).expect("get");
    adapter.head(url, &[]).expect("head");
    adapter.trace(url, &[]).expect("trace");
    adapter.options(url, &[], Bytes::new()).expect("options");
    adapter.delete(url, &[], Bytes::new()).expect("delete");
    adapter.post(url, &[], Bytes::new()).expect("post");
    adapter.put(url, &[], Bytes::new()).expect("put");
    adapter.patch(url, &[], Bytes::new()).expect("patch");

    let methods: Vec<_> = backend.calls().iter().map(|call| call.method().clone()).collect();
    assert_eq!(
        methods,
        vec![
            Method::GET,
            Method::HEAD,
            Method::TRACE,
            Method::OPTIONS,
            Method::DELETE,
            Method::POST,
            Method::PUT,
            Method::PATCH
        ]
    );
}

#[test]
fn test_non_success_status_is_not_an_error_without_validation() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/missing", status(404)));
    let adapter = adapter(&backend);

    let response = adapter.get("http://example.com/missing", &[]).expect("404 is a response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.reason(), "Not Found");
}

#[test]
fn test_send_request_keeps_the_original() {
    let backend = Arc::new(MockBackend::new());
    let adapter = adapter(&backend);
    let request = Request::new(Method::PUT, Url::parse("http://example.com/doc").expect("test URL should parse"))
        .with_body("v2")
        .with_parameter("trace", "abc");

    let response = adapter.send_request(request).expect("send succeeds");

    let internal = response.request().expect("response is bound to its request");
    let original = internal.original().expect("original request is kept");
    assert_eq!(*original.method(), Method::PUT);
    assert_eq!(internal.parameters().get_as::<String>("trace"), Some("abc".to_string()));
}
