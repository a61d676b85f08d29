//! Named-channel publish/subscribe registry.
//!
//! The correlation primitive the orchestrator builds on: events decoded from
//! engine output are dispatched on their [`EventKind`] channel, and pending
//! operations register persistent or one-shot subscribers there.
//!
//! Dispatch is synchronous and in subscription order within a channel. The
//! registry lock is never held while a callback runs, so callbacks may
//! subscribe, unsubscribe (including their own subscription), and dispatch
//! re-entrantly. One-shot subscribers are deregistered before their callback
//! runs; a subscriber added during a dispatch does not see the event being
//! dispatched.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tempo_core::events::{EngineEvent, EventKind};

type Callback = Box<dyn FnMut(&EngineEvent) + Send>;

struct Entry {
    id: u64,
    once: bool,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    channels: HashMap<EventKind, Vec<Entry>>,
    /// Subscriber ids currently checked out by an in-flight dispatch.
    in_flight: HashSet<u64>,
    /// Ids unsubscribed while checked out; honored before re-insertion.
    tombstones: HashSet<u64>,
    next_id: u64,
}

impl Registry {
    fn insert(&mut self, kind: EventKind, once: bool, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.channels
            .entry(kind)
            .or_default()
            .push(Entry { id, once, callback });
        id
    }
}

/// Publish/subscribe registry keyed by [`EventKind`].
///
/// Cloning shares the underlying registry; the orchestrator hands a clone to
/// its line-pump task.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a persistent subscriber on `kind`.
    ///
    /// The returned [`Subscription`] removes exactly this subscriber.
    /// Dropping it without calling [`Subscription::unsubscribe`] leaves the
    /// subscriber attached.
    pub fn subscribe(
        &self,
        kind: EventKind,
        callback: impl FnMut(&EngineEvent) + Send + 'static,
    ) -> Subscription {
        let id = self.registry.lock().insert(kind, false, Box::new(callback));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            kind,
            id,
        }
    }

    /// Register a subscriber that is removed before its first invocation
    /// runs, so it cannot re-arm itself or fire twice under re-entrant
    /// dispatch.
    pub fn subscribe_once(
        &self,
        kind: EventKind,
        callback: impl FnOnce(&EngineEvent) + Send + 'static,
    ) {
        let mut callback = Some(callback);
        let wrapped = move |event: &EngineEvent| {
            if let Some(callback) = callback.take() {
                callback(event);
            }
        };
        let _ = self.registry.lock().insert(kind, true, Box::new(wrapped));
    }

    /// Invoke every subscriber on the event's channel, synchronously, in
    /// subscription order. A channel with no subscribers is a no-op.
    pub fn dispatch(&self, event: &EngineEvent) {
        let kind = event.kind();
        let entries = {
            let mut registry = self.registry.lock();
            let Some(entries) = registry.channels.remove(&kind) else {
                return;
            };
            for entry in &entries {
                let _ = registry.in_flight.insert(entry.id);
            }
            entries
        };

        let mut survivors: Vec<Entry> = Vec::with_capacity(entries.len());
        for mut entry in entries {
            {
                let mut registry = self.registry.lock();
                if registry.tombstones.remove(&entry.id) {
                    let _ = registry.in_flight.remove(&entry.id);
                    continue;
                }
                if entry.once {
                    // Consumed: deregistered before the callback runs.
                    let _ = registry.in_flight.remove(&entry.id);
                }
            }
            (entry.callback)(event);
            if !entry.once {
                survivors.push(entry);
            }
        }

        let mut registry = self.registry.lock();
        for entry in &survivors {
            let _ = registry.in_flight.remove(&entry.id);
        }
        // A callback may have unsubscribed a later (or its own) subscriber.
        survivors.retain(|entry| !registry.tombstones.remove(&entry.id));
        // Subscribers added during dispatch landed in the map; they are
        // newer, so survivors go in front to preserve subscription order.
        let newer = registry.channels.remove(&kind).unwrap_or_default();
        survivors.extend(newer);
        if !survivors.is_empty() {
            let _ = registry.channels.insert(kind, survivors);
        }
    }
}

/// Capability to remove one subscriber from one channel.
///
/// `unsubscribe` is idempotent: repeated calls, or calls for a subscriber
/// already removed, are no-ops.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    kind: EventKind,
    id: u64,
}

impl Subscription {
    /// Remove the subscriber. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock();
        if let Some(entries) = registry.channels.get_mut(&self.kind) {
            let before = entries.len();
            entries.retain(|entry| entry.id != self.id);
            if entries.len() < before {
                return;
            }
        }
        // Checked out by an in-flight dispatch: leave a tombstone so the
        // dispatch drops it instead of re-inserting it.
        if registry.in_flight.contains(&self.id) {
            let _ = registry.tombstones.insert(self.id);
        }
    }
}
