//! Subscriber types for the reactive system.
//!
//! A Subscriber is a change callback registered on a signal under a
//! [`SubscriberId`]. The id is the observer token: whoever registered the
//! callback keeps it and uses it to unsubscribe later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for a subscriber.
///
/// Each subscription gets a unique ID when created. Registering twice
/// under the same ID replaces the earlier callback, which keeps a binding
/// from ever holding more than one listener on a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a subscriber wants after handling a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observe {
    /// Stay subscribed.
    Keep,
    /// Remove this subscriber once the current notification pass ends.
    Unsubscribe,
}

/// A subscriber to a signal of `T`.
///
/// The callback receives the new value and decides whether it stays
/// subscribed.
pub struct Subscriber<T> {
    id: SubscriberId,
    notify: Arc<dyn Fn(&T) -> Observe + Send + Sync>,
}

impl<T> Subscriber<T> {
    /// Create a new subscriber with the given notification callback.
    pub fn new<F>(id: SubscriberId, notify: F) -> Self
    where
        F: Fn(&T) -> Observe + Send + Sync + 'static,
    {
        Self {
            id,
            notify: Arc::new(notify),
        }
    }

    /// Get the subscriber's unique ID.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Notify the subscriber that the signal changed.
    pub fn notify(&self, value: &T) -> Observe {
        (self.notify)(value)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            notify: Arc::clone(&self.notify),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_ids_are_unique() {
        let id1 = SubscriberId::new();
        let id2 = SubscriberId::new();
        let id3 = SubscriberId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn subscriber_notify_calls_callback() {
        use std::sync::atomic::{AtomicI32, Ordering};

        let seen = Arc::new(AtomicI32::new(0));
        let seen_clone = seen.clone();

        let subscriber = Subscriber::new(SubscriberId::new(), move |value: &i32| {
            seen_clone.store(*value, Ordering::SeqCst);
            if *value > 10 {
                Observe::Unsubscribe
            } else {
                Observe::Keep
            }
        });

        assert_eq!(subscriber.notify(&7), Observe::Keep);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert_eq!(subscriber.notify(&11), Observe::Unsubscribe);
    }
}
