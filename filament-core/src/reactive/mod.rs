//! Reactive Primitives
//!
//! Signals and the subscriber protocol that keeps DOM nodes in sync with
//! them.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A Signal is a container for mutable state. Setting it notifies every
//! subscriber synchronously and eagerly: there is no scheduler, no batching
//! and no microtask deferral.
//!
//! ## Subscribers
//!
//! A subscriber is registered under a [`SubscriberId`], the observer token
//! its owner keeps. Observers may answer a notification with
//! [`Observe::Unsubscribe`] to drop themselves. DOM bindings rely on this
//! for lazy cleanup: a binding whose node has left the document removes
//! itself on the first change it sees afterwards.
//!
//! ## Erased Signals
//!
//! Templates accept signals of any value type through [`DynSignal`], which
//! exposes the value as a [`SignalValue`] (text, node, or fragment).

mod signal;
mod subscriber;
mod dynamic;

pub use signal::Signal;
pub use subscriber::{Observe, Subscriber, SubscriberId};
pub use dynamic::{DynSignal, IntoSignalValue, SignalValue, ValueObserver};
