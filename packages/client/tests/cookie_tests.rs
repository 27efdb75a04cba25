//! Tests for the cookie jar and the cookie subscriber

mod common;

use std::sync::Arc;

use common::{MockBackend, adapter, set_cookie};
use http::header::{COOKIE, SET_COOKIE};
use http_adapter_client::cookie::{Cookie, CookieJar, Jar};
use http_adapter_client::error;
use http_adapter_client::prelude::*;

fn url(s: &str) -> Url {
    Url::parse(s).expect("test URL should parse")
}

fn names(cookies: &[Cookie]) -> Vec<String> {
    cookies.iter().map(|cookie| cookie.name().to_string()).collect()
}

#[test]
fn test_jar_returns_cookies_for_matching_urls() {
    let jar = Jar::new();
    let origin = url("http://example.com/account/login");
    jar.add_cookie_str("session=abc; Path=/", &origin);
    jar.add_cookie_str("prefs=dark; Path=/account", &origin);

    let all = jar.cookies(&url("http://example.com/account/settings"));
    let mut found = names(&all);
    found.sort();
    assert_eq!(found, vec!["prefs", "session"]);

    assert_eq!(names(&jar.cookies(&url("http://example.com/home"))), vec!["session"]);
    assert!(jar.cookies(&url("http://other.example/")).is_empty());
    assert_eq!(jar.len(), 2);
}

#[test]
fn test_cookie_view_exposes_attributes() {
    let jar = Jar::new();
    let origin = url("https://example.com/");
    jar.add_cookie_str("token=xyz; Path=/; Secure; HttpOnly; Max-Age=3600", &origin);

    let cookies = jar.cookies(&origin);
    let cookie = cookies.first().expect("cookie is stored");
    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value(), "xyz");
    assert!(cookie.secure());
    assert!(cookie.http_only());
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn test_secure_cookies_are_only_sent_over_https() {
    let jar = Jar::new();
    jar.add_cookie_str("token=xyz; Path=/; Secure", &url("https://example.com/"));

    assert_eq!(jar.cookies(&url("https://example.com/")).len(), 1);
    assert!(jar.cookies(&url("http://example.com/")).is_empty());
}

#[test]
fn test_max_age_zero_removes_the_cookie() {
    let jar = Jar::new();
    let origin = url("http://example.com/");
    jar.add_cookie_str("session=abc; Path=/", &origin);
    assert_eq!(jar.len(), 1);

    jar.add_cookie_str("session=gone; Path=/; Max-Age=0", &origin);

    assert!(jar.cookies(&origin).is_empty());
    assert!(jar.is_empty());
}

#[test]
fn test_cookies_with_past_expires_are_not_sent() {
    let jar = Jar::new();
    let origin = url("http://example.com/");
    jar.add_cookie_str("stale=old; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT", &origin);
    jar.add_cookie_str("session=abc; Path=/", &origin);
    jar.add_cookie_str("session=abc; Path=/; Expires=Wed, 21 Oct 2015 07:28:00 GMT", &origin);

    let populated = jar.populate(&InternalRequest::new(Method::GET, origin));

    assert!(populated.header("cookie").is_none());
}

#[test]
fn test_same_key_replaces_value() {
    let jar = Jar::new();
    let origin = url("http://example.com/");
    jar.add_cookie_str("session=one; Path=/", &origin);
    jar.add_cookie_str("session=two; Path=/", &origin);

    let cookies = jar.cookies(&origin);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].value(), "two");
}

#[test]
fn test_populate_merges_with_existing_header_and_is_idempotent() {
    let jar = Jar::new();
    let origin = url("http://example.com/");
    jar.add_cookie_str("session=abc; Path=/", &origin);

    let request = InternalRequest::new(Method::GET, origin)
        .with_header(COOKIE, HeaderValue::from_static("theme=light; session=stale"));
    let once = jar.populate(&request);
    let twice = jar.populate(&once);

    assert_eq!(once.header("cookie"), Some("theme=light; session=abc"));
    assert_eq!(twice.header("cookie"), once.header("cookie"));
}

#[test]
fn test_populate_without_matching_cookies_leaves_request_untouched() {
    let jar = Jar::new();
    let request = InternalRequest::new(Method::GET, url("http://example.com/"));

    let populated = jar.populate(&request);

    assert!(populated.header("cookie").is_none());
    assert_eq!(populated.id(), request.id());
}

#[test]
fn test_extract_ignores_invalid_cookies() {
    let jar = Jar::new();
    let request = InternalRequest::new(Method::GET, url("http://example.com/"));
    let response = Response::new(StatusCode::OK)
        .with_header(SET_COOKIE, HeaderValue::from_static("=nameless"))
        .with_header(SET_COOKIE, HeaderValue::from_static("good=1; Path=/"));

    jar.extract(&request, &response);

    assert_eq!(names(&jar.cookies(&url("http://example.com/"))), vec!["good"]);
}

#[test]
fn test_clear_empties_the_jar() {
    let jar = Jar::new();
    jar.add_cookie_str("a=1", &url("http://example.com/"));
    jar.clear();
    assert!(jar.is_empty());
}

#[test]
fn test_subscriber_carries_cookies_between_requests() {
    let backend = Arc::new(MockBackend::new().route("http://example.com/login", set_cookie(200, "session=abc; Path=/")));
    let jar = Jar::new();
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(CookieSubscriber::new(jar.clone())));

    adapter.get("http://example.com/login", &[]).expect("login succeeds");
    assert!(backend.last_call().header("cookie").is_none());

    adapter.get("http://example.com/profile", &[]).expect("profile succeeds");
    assert_eq!(backend.last_call().header("cookie"), Some("session=abc"));
    assert_eq!(jar.len(), 1);
}

#[test]
fn test_subscriber_populates_batch_requests() {
    let backend = Arc::new(MockBackend::new());
    let jar = Jar::new();
    jar.add_cookie_str("session=abc; Path=/", &url("http://example.com/"));
    let mut adapter = adapter(&backend);
    adapter.subscribe(Arc::new(CookieSubscriber::new(jar)));

    let requests = vec![
        Request::new(Method::GET, url("http://example.com/a")),
        Request::new(Method::GET, url("http://example.com/b")),
    ];
    adapter.send_requests(requests).expect("batch completes");

    for call in backend.calls() {
        assert_eq!(call.header("cookie"), Some("session=abc"));
    }
}

#[test]
fn test_cookies_are_extracted_from_failed_responses() {
    let backend = Arc::new(MockBackend::new());
    let adapter = adapter(&backend);
    let jar = Jar::new();
    let subscriber = CookieSubscriber::new(jar.clone());

    let request = Arc::new(InternalRequest::new(Method::GET, url("http://example.com/admin")));
    let response = Response::new(StatusCode::FORBIDDEN)
        .with_header(SET_COOKIE, HeaderValue::from_static("denied=1; Path=/"))
        .with_request(Arc::clone(&request));
    let failure = error::status_code(adapter.name(), request, response);
    let mut event = ExceptionEvent::new(&adapter, failure);

    subscriber.on_exception(&mut event).expect("extraction never fails");

    assert_eq!(names(&jar.cookies(&url("http://example.com/"))), vec!["denied"]);
}
