//! Priority-ordered, synchronous event dispatch

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use super::Event;
use super::kind::EventKind;
use super::subscriber::Subscriber;
use crate::error::Result;

struct Listener {
    priority: i32,
    sequence: u64,
    handler: &'static str,
    subscriber: Arc<dyn Subscriber>,
}

/// Registration table plus dispatch loop.
///
/// Registration takes `&mut self` and dispatch `&self`, so the table cannot
/// change while an event is being delivered. Nested dispatch from inside a
/// handler (a subscriber re-sending through the adapter) is fine.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: HashMap<EventKind, Vec<Listener>>,
    sequence: u64,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every subscription the subscriber declares.
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        for subscription in subscriber.subscribed_events() {
            let listeners = self.listeners.entry(subscription.event).or_default();

            if listeners
                .iter()
                .any(|listener| Arc::ptr_eq(&listener.subscriber, &subscriber))
            {
                tracing::warn!(
                    event = %subscription.event,
                    handler = subscription.handler,
                    "subscriber already registered for this event, ignoring duplicate"
                );
                continue;
            }

            self.sequence += 1;
            listeners.push(Listener {
                priority: subscription.priority,
                sequence: self.sequence,
                handler: subscription.handler,
                subscriber: Arc::clone(&subscriber),
            });
            // Stable order: priority descending, then registration order.
            listeners.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(a.sequence.cmp(&b.sequence))
            });
        }
    }

    /// Unregisters every subscription of `subscriber` (pointer identity).
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_subscriber(&mut self, subscriber: &Arc<dyn Subscriber>) -> bool {
        let mut removed = false;
        for listeners in self.listeners.values_mut() {
            let before = listeners.len();
            listeners.retain(|listener| !Arc::ptr_eq(&listener.subscriber, subscriber));
            removed |= listeners.len() != before;
        }
        removed
    }

    /// `(handler, priority)` pairs registered for `kind`, in dispatch order.
    #[must_use]
    pub fn listeners(&self, kind: EventKind) -> Vec<(&'static str, i32)> {
        self.listeners
            .get(&kind)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|listener| (listener.handler, listener.priority))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|listeners| !listeners.is_empty())
    }

    /// Delivers `event` to every listener of its kind, highest priority first.
    ///
    /// Stops after the handler that stopped propagation.
    ///
    /// # Errors
    ///
    /// Returns the first error a handler returns; later handlers do not run.
    pub fn dispatch<'a, E: Event<'a>>(&self, event: &mut E) -> Result<()> {
        let Some(listeners) = self.listeners.get(&E::KIND) else {
            return Ok(());
        };

        for listener in listeners {
            tracing::trace!(
                event = %E::KIND,
                handler = listener.handler,
                priority = listener.priority,
                "dispatching event"
            );
            event.deliver(listener.subscriber.as_ref())?;

            if event.is_propagation_stopped() {
                tracing::trace!(
                    event = %E::KIND,
                    handler = listener.handler,
                    "event propagation stopped"
                );
                break;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            if self.has_listeners(kind) {
                map.entry(&kind, &self.listeners(kind));
            }
        }
        map.finish()
    }
}
