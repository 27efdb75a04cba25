use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of lifecycle events a send moves through.
///
/// `PreSend`, `PostSend` and `Exception` are also known as "request
/// created", "request sent" and "request errored".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PreSend,
    PostSend,
    Exception,
    MultiRequestCreated,
    MultiRequestSent,
    MultiRequestErrored,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PreSend,
        EventKind::PostSend,
        EventKind::Exception,
        EventKind::MultiRequestCreated,
        EventKind::MultiRequestSent,
        EventKind::MultiRequestErrored,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::PreSend => "pre_send",
            EventKind::PostSend => "post_send",
            EventKind::Exception => "exception",
            EventKind::MultiRequestCreated => "multi_request_created",
            EventKind::MultiRequestSent => "multi_request_sent",
            EventKind::MultiRequestErrored => "multi_request_errored",
        }
    }

    #[must_use]
    pub fn is_multi(self) -> bool {
        matches!(
            self,
            EventKind::MultiRequestCreated | EventKind::MultiRequestSent | EventKind::MultiRequestErrored
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
