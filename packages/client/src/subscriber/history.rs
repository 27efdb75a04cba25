//! Journal of completed sends

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::event::{
    EventKind, MultiRequestCreatedEvent, MultiRequestSentEvent, PostSendEvent, PreSendEvent,
    Subscriber, Subscription,
};
use crate::http::InternalRequest;
use crate::http::parameters::HISTORY_STARTED_AT;
use crate::telemetry::{Journal, JournalEntry};

fn unix_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

fn elapsed_since_start(request: &InternalRequest) -> Duration {
    request
        .parameters()
        .get_as::<u64>(HISTORY_STARTED_AT)
        .map(|started| Duration::from_micros(unix_micros().saturating_sub(started)))
        .unwrap_or_default()
}

/// Records every response with its request and duration in a [`Journal`].
///
/// Requests are stamped with a `history_started_at` parameter (unix
/// microseconds) when they enter the pipeline.
#[derive(Debug, Clone, Default)]
pub struct HistorySubscriber {
    journal: Arc<Journal>,
}

impl HistorySubscriber {
    pub const PRIORITY: i32 = 100;

    #[must_use]
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }

    #[must_use]
    pub fn journal(&self) -> &Arc<Journal> {
        &self.journal
    }
}

impl Subscriber for HistorySubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventKind::PreSend, "on_pre_send", Self::PRIORITY),
            Subscription::new(EventKind::PostSend, "on_post_send", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestCreated, "on_multi_request_created", Self::PRIORITY),
            Subscription::new(EventKind::MultiRequestSent, "on_multi_request_sent", Self::PRIORITY),
        ]
    }

    fn on_pre_send(&self, event: &mut PreSendEvent<'_>) -> Result<()> {
        let request = event
            .request()
            .clone()
            .with_parameter(HISTORY_STARTED_AT, unix_micros());
        event.set_request(request);
        Ok(())
    }

    fn on_post_send(&self, event: &mut PostSendEvent<'_>) -> Result<()> {
        let request = event.request();
        self.journal.record(JournalEntry::new(
            Arc::clone(request),
            event.response().clone(),
            elapsed_since_start(request),
        ));
        Ok(())
    }

    fn on_multi_request_created(&self, event: &mut MultiRequestCreatedEvent<'_>) -> Result<()> {
        let started = unix_micros();
        for request in event.requests_mut() {
            *request = request.clone().with_parameter(HISTORY_STARTED_AT, started);
        }
        Ok(())
    }

    fn on_multi_request_sent(&self, event: &mut MultiRequestSentEvent<'_>) -> Result<()> {
        for response in event.responses() {
            if let Some(request) = response.request() {
                self.journal.record(JournalEntry::new(
                    Arc::clone(request),
                    response.clone(),
                    elapsed_since_start(request),
                ));
            }
        }
        Ok(())
    }
}
