//! Signal Implementation
//!
//! A Signal holds a value and a list of subscribers. Setting the value
//! notifies every subscriber synchronously, in registration order, before
//! `set` returns. There is no batching and no deferral.
//!
//! # Self-removing Subscribers
//!
//! A subscriber registered with [`Signal::observe`] returns [`Observe`]
//! from its callback. Returning [`Observe::Unsubscribe`] removes it once
//! the notification pass is over. DOM bindings use this to drop themselves
//! the first time they notice their node has left the document.
//!
//! # Thread Safety
//!
//! The value and the subscriber list each sit behind a `parking_lot`
//! RwLock. Notification works on a snapshot of the subscriber list, so a
//! callback may subscribe or unsubscribe without deadlocking.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use super::subscriber::{Observe, Subscriber, SubscriberId};

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique signal ID.
fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A reactive signal holding a value of type T.
///
/// # Type Parameters
///
/// - `T`: The type of value stored in the signal. Must be Clone + Send + Sync.
///
/// # Example
///
/// ```rust
/// use filament_core::reactive::Signal;
///
/// let count = Signal::new(0);
/// assert_eq!(count.get(), 0);
///
/// // Update the value (notifies subscribers)
/// count.set(5);
/// assert_eq!(count.get(), 5);
/// ```
pub struct Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique identifier for this signal.
    id: u64,

    /// The current value.
    value: Arc<RwLock<T>>,

    /// Registered subscribers, in registration order.
    subscribers: Arc<RwLock<Vec<Subscriber<T>>>>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: next_signal_id(),
            value: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    /// Set a new value and notify subscribers.
    pub fn set(&self, value: T) {
        *self.value.write() = value;
        self.notify_subscribers();
    }

    /// Update the value using a function.
    ///
    /// This is useful for updates that depend on the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let new_value = f(&self.value.read());
        self.set(new_value);
    }

    /// Register a callback that runs on every change until unsubscribed.
    pub fn subscribe<F>(&self, subscriber_id: SubscriberId, notify: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.observe(subscriber_id, move |value| {
            notify(value);
            Observe::Keep
        });
    }

    /// Register a callback that decides after each change whether it
    /// stays subscribed.
    ///
    /// Registering again under an existing ID replaces that subscriber.
    pub fn observe<F>(&self, subscriber_id: SubscriberId, notify: F)
    where
        F: Fn(&T) -> Observe + Send + Sync + 'static,
    {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|s| s.id() != subscriber_id);
        subscribers.push(Subscriber::new(subscriber_id, notify));
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&self, subscriber_id: SubscriberId) {
        self.subscribers
            .write()
            .retain(|s| s.id() != subscriber_id);
    }

    /// Notify all subscribers that the value has changed.
    fn notify_subscribers(&self) {
        let snapshot: SmallVec<[Subscriber<T>; 4]> =
            self.subscribers.read().iter().cloned().collect();
        if snapshot.is_empty() {
            return;
        }

        let value = self.get();
        let mut finished: SmallVec<[SubscriberId; 4]> = SmallVec::new();
        for subscriber in &snapshot {
            if subscriber.notify(&value) == Observe::Unsubscribe {
                finished.push(subscriber.id());
            }
        }

        if !finished.is_empty() {
            tracing::trace!(signal = self.id, removed = finished.len(), "subscribers finished");
            self.subscribers
                .write()
                .retain(|s| !finished.contains(&s.id()));
        }
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &*self.value.read())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
