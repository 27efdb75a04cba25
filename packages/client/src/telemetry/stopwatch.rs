//! Named timers fed by the stopwatch subscriber

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use hashbrown::HashMap;

/// Receiver of start/stop notifications for named timers.
///
/// Implement it to forward request timings to an external profiler.
pub trait TimerSink: Send + Sync {
    fn start(&self, name: &str);
    fn stop(&self, name: &str);
}

impl<T: TimerSink + ?Sized> TimerSink for Arc<T> {
    fn start(&self, name: &str) {
        (**self).start(name);
    }

    fn stop(&self, name: &str) {
        (**self).stop(name);
    }
}

/// One completed start/stop pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lap {
    pub name: String,
    pub duration: Duration,
}

/// In-memory [`TimerSink`] recording running timers and completed laps.
///
/// Starting a name that is already running restarts it.
#[derive(Debug, Default)]
pub struct Stopwatch {
    running: Mutex<HashMap<String, Instant>>,
    laps: Mutex<Vec<Lap>>,
}

impl Stopwatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_running(&self, name: &str) -> bool {
        self.running
            .lock()
            .map(|running| running.contains_key(name))
            .unwrap_or(false)
    }

    /// Names of the timers started and not yet stopped.
    #[must_use]
    pub fn running(&self) -> Vec<String> {
        self.running
            .lock()
            .map(|running| running.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Completed laps, oldest first.
    #[must_use]
    pub fn laps(&self) -> Vec<Lap> {
        self.laps.lock().map(|laps| laps.clone()).unwrap_or_default()
    }

    /// Most recent lap recorded under `name`.
    #[must_use]
    pub fn lap(&self, name: &str) -> Option<Lap> {
        self.laps
            .lock()
            .ok()
            .and_then(|laps| laps.iter().rev().find(|lap| lap.name == name).cloned())
    }

    pub fn reset(&self) {
        if let Ok(mut running) = self.running.lock() {
            running.clear();
        }
        if let Ok(mut laps) = self.laps.lock() {
            laps.clear();
        }
    }
}

impl TimerSink for Stopwatch {
    fn start(&self, name: &str) {
        if let Ok(mut running) = self.running.lock() {
            running.insert(name.to_string(), Instant::now());
        }
    }

    fn stop(&self, name: &str) {
        let started = match self.running.lock() {
            Ok(mut running) => running.remove(name),
            Err(_) => return,
        };

        match started {
            Some(started) => {
                if let Ok(mut laps) = self.laps.lock() {
                    laps.push(Lap {
                        name: name.to_string(),
                        duration: started.elapsed(),
                    });
                }
            }
            None => tracing::debug!(timer = name, "stop requested for a timer that is not running"),
        }
    }
}
