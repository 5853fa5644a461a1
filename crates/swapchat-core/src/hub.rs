use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::Message;

type Callback = dyn Fn(&str, &Message) + Send + Sync;

thread_local! {
    static CONTAINING_PANICS: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is fanning out a publish, where a subscriber
/// panic is caught and does not unwind the program. A global panic hook can
/// check this to skip teardown (restoring the terminal, say) for faults that
/// stay contained.
pub fn panic_is_contained() -> bool {
    CONTAINING_PANICS.with(Cell::get)
}

#[derive(Default)]
struct Registry {
    subscribers: Vec<(u64, Arc<Callback>)>,
}

/// Process-wide registry of message observers. The store publishes here after
/// every successful insertion, local or external, so subscribers cannot tell
/// simulated traffic from the real thing.
#[derive(Default)]
pub struct NotificationHub {
    registry: Arc<Mutex<Registry>>,
    next_id: AtomicU64,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every subsequent insertion. The returned
    /// [`Subscription`] unregisters it, either explicitly or on drop.
    ///
    /// Callbacks run synchronously on the inserting thread, while the store
    /// lock is held: hand the event off to a channel instead of calling back
    /// into the service.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str, &Message) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .lock()
            .subscribers
            .push((id, Arc::new(callback)));
        Subscription {
            id,
            registry: self.registry.clone(),
        }
    }

    /// Invoke every currently registered callback once. Iterates a snapshot of
    /// the subscriber set, so callbacks may subscribe or unsubscribe without
    /// disturbing the fan-out in progress. A panicking subscriber is logged
    /// and skipped, never propagated to the publisher or its peers.
    pub fn publish(&self, conversation_id: &str, message: &Message) {
        let snapshot: Vec<Arc<Callback>> = self
            .registry
            .lock()
            .subscribers
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in snapshot {
            CONTAINING_PANICS.with(|flag| flag.set(true));
            let outcome = catch_unwind(AssertUnwindSafe(|| callback(conversation_id, message)));
            CONTAINING_PANICS.with(|flag| flag.set(false));
            if outcome.is_err() {
                tracing::warn!(conversation_id, "subscriber panicked during publish");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().subscribers.len()
    }
}

/// Capability to remove one registered callback.
pub struct Subscription {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl Subscription {
    /// Remove the callback. Calling this more than once has no further effect.
    pub fn unsubscribe(&self) {
        self.registry
            .lock()
            .subscribers
            .retain(|(id, _)| *id != self.id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
