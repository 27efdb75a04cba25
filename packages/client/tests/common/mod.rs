//! Scripted backend and recording subscribers shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::header::{LOCATION, SET_COOKIE};
use http::{HeaderValue, StatusCode};
use http_adapter_client::prelude::*;

/// What the mock answers for one request.
#[derive(Debug, Clone)]
pub enum Outcome {
    Respond(RawResponse),
    Fail(String),
    Timeout,
}

impl Outcome {
    fn into_result(self) -> std::result::Result<RawResponse, TransportError> {
        match self {
            Outcome::Respond(raw) => Ok(raw),
            Outcome::Fail(message) => Err(TransportError::Connect(message)),
            Outcome::Timeout => Err(TransportError::Timeout(Duration::from_secs(10))),
        }
    }
}

pub fn ok() -> Outcome {
    status(200)
}

pub fn status(code: u16) -> Outcome {
    let status = StatusCode::from_u16(code).expect("test status should be valid");
    Outcome::Respond(RawResponse::new(status))
}

pub fn body(text: &'static str) -> Outcome {
    Outcome::Respond(RawResponse::new(StatusCode::OK).with_body(text))
}

pub fn redirect(code: u16, location: &'static str) -> Outcome {
    let status = StatusCode::from_u16(code).expect("test status should be valid");
    Outcome::Respond(RawResponse::new(status).with_header(LOCATION, HeaderValue::from_static(location)))
}

pub fn set_cookie(code: u16, cookie: &'static str) -> Outcome {
    let status = StatusCode::from_u16(code).expect("test status should be valid");
    Outcome::Respond(RawResponse::new(status).with_header(SET_COOKIE, HeaderValue::from_static(cookie)))
}

pub fn fail(message: &str) -> Outcome {
    Outcome::Fail(message.to_string())
}

/// Backend answering from per-URL scripts.
///
/// Each URL has a queue of outcomes; the last one repeats once the queue is
/// down to it. Unknown URLs answer `200 OK`.
pub struct MockBackend {
    name: String,
    routes: Mutex<HashMap<String, VecDeque<Outcome>>>,
    calls: Mutex<Vec<InternalRequest>>,
    batches: Mutex<usize>,
    reverse_batches: bool,
    unanswered: Vec<String>,
    unknown_result: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::named("mock")
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            batches: Mutex::new(0),
            reverse_batches: false,
            unanswered: Vec::new(),
            unknown_result: false,
        }
    }

    /// Appends `outcome` to the script of `url`.
    pub fn route(self, url: &str, outcome: Outcome) -> Self {
        self.routes
            .lock()
            .expect("routes lock")
            .entry(url.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    /// Answers batches in reverse submission order.
    pub fn reversed_batches(mut self) -> Self {
        self.reverse_batches = true;
        self
    }

    /// Leaves requests to `url` without a batch result.
    pub fn unanswered(mut self, url: &str) -> Self {
        self.unanswered.push(url.to_string());
        self
    }

    /// Adds a batch result for a request that was never submitted.
    pub fn with_unknown_result(mut self) -> Self {
        self.unknown_result = true;
        self
    }

    /// Requests received, in order.
    pub fn calls(&self) -> Vec<InternalRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn batch_count(&self) -> usize {
        *self.batches.lock().expect("batches lock")
    }

    pub fn last_call(&self) -> InternalRequest {
        self.calls().pop().expect("backend was called")
    }

    fn answer(&self, request: &InternalRequest) -> Outcome {
        self.calls.lock().expect("calls lock").push(request.clone());

        let mut routes = self.routes.lock().expect("routes lock");
        match routes.get_mut(request.url().as_str()) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap_or_else(ok),
            Some(script) => script.front().cloned().unwrap_or_else(ok),
            None => ok(),
        }
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(
        &self,
        request: &InternalRequest,
        _config: &AdapterConfig,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.answer(request).into_result()
    }

    fn send_batch(&self, requests: &[Arc<InternalRequest>], _config: &AdapterConfig) -> Vec<BatchItem> {
        *self.batches.lock().expect("batches lock") += 1;

        let mut items: Vec<BatchItem> = requests
            .iter()
            .filter(|request| !self.unanswered.iter().any(|url| url == request.url().as_str()))
            .map(|request| BatchItem::new(request.id(), self.answer(request).into_result()))
            .collect();

        if self.reverse_batches {
            items.reverse();
        }

        if self.unknown_result {
            let stray = InternalRequest::new(Method::GET, Url::parse("http://stray.test/").expect("test URL should parse"));
            items.push(BatchItem::new(stray.id(), Ok(RawResponse::new(StatusCode::OK))));
        }

        items
    }
}

/// Subscriber appending `"<label>:<event>"` to a shared log for each event it sees.
pub struct Recorder {
    label: &'static str,
    priority: i32,
    kinds: Vec<EventKind>,
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new(label: &'static str, priority: i32, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label,
            priority,
            kinds: EventKind::ALL.to_vec(),
            log: Arc::clone(log),
        }
    }

    pub fn only(mut self, kinds: &[EventKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    fn record(&self, kind: EventKind) {
        self.log
            .lock()
            .expect("log lock")
            .push(format!("{}:{}", self.label, kind));
    }
}

impl Subscriber for Recorder {
    fn subscribed_events(&self) -> Vec<Subscription> {
        self.kinds
            .iter()
            .map(|kind| Subscription::new(*kind, "record", self.priority))
            .collect()
    }

    fn on_pre_send(&self, _event: &mut PreSendEvent<'_>) -> http_adapter_client::error::Result<()> {
        self.record(EventKind::PreSend);
        Ok(())
    }

    fn on_post_send(&self, _event: &mut PostSendEvent<'_>) -> http_adapter_client::error::Result<()> {
        self.record(EventKind::PostSend);
        Ok(())
    }

    fn on_exception(&self, _event: &mut ExceptionEvent<'_>) -> http_adapter_client::error::Result<()> {
        self.record(EventKind::Exception);
        Ok(())
    }

    fn on_multi_request_created(
        &self,
        _event: &mut MultiRequestCreatedEvent<'_>,
    ) -> http_adapter_client::error::Result<()> {
        self.record(EventKind::MultiRequestCreated);
        Ok(())
    }

    fn on_multi_request_sent(&self, _event: &mut MultiRequestSentEvent<'_>) -> http_adapter_client::error::Result<()> {
        self.record(EventKind::MultiRequestSent);
        Ok(())
    }

    fn on_multi_request_errored(
        &self,
        _event: &mut MultiRequestErroredEvent<'_>,
    ) -> http_adapter_client::error::Result<()> {
        self.record(EventKind::MultiRequestErrored);
        Ok(())
    }
}

pub fn new_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().expect("log lock").clone()
}

/// Adapter over a shared mock so tests can inspect the calls afterwards.
pub fn adapter(backend: &Arc<MockBackend>) -> HttpAdapter {
    HttpAdapter::new(Arc::clone(backend))
}
