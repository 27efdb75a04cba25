//! Bounded record of completed sends

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::http::{InternalRequest, Response};

/// One completed send.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    request: Arc<InternalRequest>,
    response: Response,
    duration: Duration,
}

impl JournalEntry {
    #[must_use]
    pub fn new(request: Arc<InternalRequest>, response: Response, duration: Duration) -> Self {
        Self {
            request,
            response,
            duration,
        }
    }

    #[must_use]
    pub fn request(&self) -> &Arc<InternalRequest> {
        &self.request
    }

    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Time between `PreSend` and `PostSend` for this request.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Journal keeping the most recent entries; the oldest is dropped once the
/// limit is reached.
#[derive(Debug)]
pub struct Journal {
    entries: Mutex<VecDeque<JournalEntry>>,
    limit: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

impl Journal {
    pub const DEFAULT_LIMIT: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(limit)),
            limit,
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn record(&self, entry: JournalEntry) {
        if self.limit == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            while entries.len() >= self.limit {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<JournalEntry> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.back().cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
