//! Change listeners with per-listener failure isolation.

use crate::core::{State, TransitionRecord};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// Callback notified after every successful transition.
pub type Listener<S> = Arc<dyn Fn(&TransitionRecord<S>) + Send + Sync>;

struct Registry<S: State> {
    next_id: u64,
    listeners: Vec<(u64, Listener<S>)>,
}

/// Registry of change listeners.
///
/// Listeners are notified in registration order. A listener that panics is
/// logged and skipped; the remaining listeners still receive the record.
pub struct SubscriptionHub<S: State> {
    registry: Arc<Mutex<Registry<S>>>,
}

impl<S: State> Default for SubscriptionHub<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> SubscriptionHub<S> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. Keep the returned handle to unsubscribe later.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<S>
    where
        F: Fn(&TransitionRecord<S>) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.lock().listeners.is_empty()
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.registry.lock().listeners.clear();
    }

    /// Deliver `record` to every listener registered at call time.
    ///
    /// The registry lock is released before any listener runs, so listeners
    /// may subscribe or unsubscribe from inside the callback.
    pub fn notify(&self, record: &TransitionRecord<S>) {
        let listeners: Vec<(u64, Listener<S>)> = self.registry.lock().listeners.clone();

        for (id, listener) in listeners {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(record)));
            if let Err(payload) = outcome {
                tracing::error!(
                    "Listener {} panicked handling '{}' ({} -> {}): {}",
                    id,
                    record.event,
                    record.from.name(),
                    record.to.name(),
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

/// Handle returned by [`SubscriptionHub::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription<S: State> {
    id: u64,
    registry: Weak<Mutex<Registry<S>>>,
}

impl<S: State> Subscription<S> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.lock();
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        registry.listeners.len() != before
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
