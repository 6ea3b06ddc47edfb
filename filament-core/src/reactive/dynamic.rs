//! Type-erased signals.
//!
//! Templates interpolate signals of many value types. [`DynSignal`] erases
//! the type parameter so every signal can be handled the same way: its
//! value is read as a [`SignalValue`], which is either text or DOM content.

use crate::dom::{DocumentFragment, NodeRef};

use super::signal::Signal;
use super::subscriber::{Observe, SubscriberId};

/// The DOM-facing view of a signal's value.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalValue {
    /// Text-like content, bound through a text node or attribute value.
    Text(String),
    /// A single node, swapped in place on change.
    Node(NodeRef),
    /// A fragment. It has no single node to swap, so it can only be placed once.
    Fragment(DocumentFragment),
}

impl SignalValue {
    /// Text form, used for attribute values.
    pub fn to_text(&self) -> String {
        match self {
            SignalValue::Text(text) => text.clone(),
            SignalValue::Node(node) => node.text_content(),
            SignalValue::Fragment(fragment) => fragment.text_content(),
        }
    }
}

/// Conversion from a signal's value type into a [`SignalValue`].
pub trait IntoSignalValue {
    fn to_signal_value(&self) -> SignalValue;
}

impl IntoSignalValue for SignalValue {
    fn to_signal_value(&self) -> SignalValue {
        self.clone()
    }
}

impl IntoSignalValue for String {
    fn to_signal_value(&self) -> SignalValue {
        SignalValue::Text(self.clone())
    }
}

impl IntoSignalValue for &'static str {
    fn to_signal_value(&self) -> SignalValue {
        SignalValue::Text((*self).to_string())
    }
}

impl IntoSignalValue for NodeRef {
    fn to_signal_value(&self) -> SignalValue {
        SignalValue::Node(self.clone())
    }
}

impl IntoSignalValue for DocumentFragment {
    fn to_signal_value(&self) -> SignalValue {
        SignalValue::Fragment(self.clone())
    }
}

impl<T: IntoSignalValue> IntoSignalValue for Option<T> {
    fn to_signal_value(&self) -> SignalValue {
        match self {
            Some(value) => value.to_signal_value(),
            None => SignalValue::Text(String::new()),
        }
    }
}

macro_rules! text_signal_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoSignalValue for $ty {
                fn to_signal_value(&self) -> SignalValue {
                    SignalValue::Text(self.to_string())
                }
            }
        )*
    };
}

text_signal_value!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Callback registered through [`DynSignal::observe_value`].
pub type ValueObserver = Box<dyn Fn(SignalValue) -> Observe + Send + Sync>;

/// A signal with its value type erased.
pub trait DynSignal: Send + Sync {
    /// The signal's unique ID.
    fn id(&self) -> u64;

    /// Current value.
    fn current(&self) -> SignalValue;

    /// Register a self-removing observer under `id`.
    fn observe_value(&self, id: SubscriberId, observer: ValueObserver);

    /// Remove the observer registered under `id`.
    fn unsubscribe(&self, id: SubscriberId);

    /// Number of registered observers.
    fn subscriber_count(&self) -> usize;
}

impl<T> DynSignal for Signal<T>
where
    T: Clone + Send + Sync + IntoSignalValue + 'static,
{
    fn id(&self) -> u64 {
        Signal::id(self)
    }

    fn current(&self) -> SignalValue {
        self.with(|value| value.to_signal_value())
    }

    fn observe_value(&self, id: SubscriberId, observer: ValueObserver) {
        self.observe(id, move |value: &T| observer(value.to_signal_value()));
    }

    fn unsubscribe(&self, id: SubscriberId) {
        Signal::unsubscribe(self, id)
    }

    fn subscriber_count(&self) -> usize {
        Signal::subscriber_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn scalars_become_text() {
        assert_eq!(42_i32.to_signal_value(), SignalValue::Text("42".into()));
        assert_eq!(true.to_signal_value(), SignalValue::Text("true".into()));
        assert_eq!(None::<String>.to_signal_value(), SignalValue::Text(String::new()));
    }

    #[test]
    fn node_text_form_is_text_content() {
        let b = NodeRef::element("b");
        b.append_child(&NodeRef::text("bold")).unwrap();
        assert_eq!(SignalValue::Node(b).to_text(), "bold");
    }

    #[test]
    fn erased_signal_forwards_changes() {
        let signal = Signal::new(1_u32);
        let erased: Arc<dyn DynSignal> = Arc::new(signal.clone());
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        erased.observe_value(
            SubscriberId::new(),
            Box::new(move |v| {
                seen_clone.lock().push(v.to_text());
                Observe::Keep
            }),
        );
        signal.set(2);

        assert_eq!(erased.current(), SignalValue::Text("2".into()));
        assert_eq!(erased.id(), signal.id());
        assert_eq!(*seen.lock(), vec!["2".to_string()]);
        assert_eq!(erased.subscriber_count(), 1);
    }
}
