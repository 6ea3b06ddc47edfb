//! Interpolated values.

use std::fmt;
use std::sync::Arc;

use crate::dom::{DocumentFragment, ElementRef, EventListener, NodeRef};
use crate::raw::{RawCss, RawHtml};
use crate::reactive::{DynSignal, IntoSignalValue, Signal};

/// A value interpolated into a template.
///
/// The variants are listed in classification order. A value belongs to
/// exactly one variant, so there is no tie to break at render time.
#[derive(Clone)]
pub enum Value {
    /// Trusted markup, emitted verbatim.
    RawHtml(RawHtml),
    /// A list of values placed as sibling nodes.
    List(Vec<Value>),
    Fragment(DocumentFragment),
    /// Stylesheet text for a `css=` attribute.
    Css(RawCss),
    /// Reference slot for a `ref=` attribute.
    Ref(ElementRef),
    Node(NodeRef),
    Signal(Arc<dyn DynSignal>),
    /// Listener for an `on<event>=` attribute.
    Listener(EventListener),
    /// Any other object, emitted through its `Display` form.
    Object(Arc<dyn fmt::Display + Send + Sync>),
    Text(String),
    None,
}

impl Value {
    /// Wrap any displayable object.
    pub fn display<D>(object: D) -> Self
    where
        D: fmt::Display + Send + Sync + 'static,
    {
        Value::Object(Arc::new(object))
    }

    pub fn signal<T>(signal: &Signal<T>) -> Self
    where
        T: Clone + Send + Sync + IntoSignalValue + 'static,
    {
        Value::Signal(Arc::new(signal.clone()))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::RawHtml(raw) => f.debug_tuple("RawHtml").field(raw).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Fragment(fragment) => f.debug_tuple("Fragment").field(fragment).finish(),
            Value::Css(css) => f.debug_tuple("Css").field(css).finish(),
            Value::Ref(r) => f.debug_tuple("Ref").field(r).finish(),
            Value::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Value::Signal(signal) => f.debug_tuple("Signal").field(&signal.id()).finish(),
            Value::Listener(listener) => f.debug_tuple("Listener").field(listener).finish(),
            Value::Object(object) => f.debug_tuple("Object").field(&object.to_string()).finish(),
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::None => f.write_str("None"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Value::Text(text.clone())
    }
}

macro_rules! text_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Text(value.to_string())
                }
            }
        )*
    };
}

text_value!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<NodeRef> for Value {
    fn from(node: NodeRef) -> Self {
        Value::Node(node)
    }
}

impl From<&NodeRef> for Value {
    fn from(node: &NodeRef) -> Self {
        Value::Node(node.clone())
    }
}

impl From<DocumentFragment> for Value {
    fn from(fragment: DocumentFragment) -> Self {
        Value::Fragment(fragment)
    }
}

impl From<ElementRef> for Value {
    fn from(r: ElementRef) -> Self {
        Value::Ref(r)
    }
}

impl From<&ElementRef> for Value {
    fn from(r: &ElementRef) -> Self {
        Value::Ref(r.clone())
    }
}

impl<T> From<Signal<T>> for Value
where
    T: Clone + Send + Sync + IntoSignalValue + 'static,
{
    fn from(signal: Signal<T>) -> Self {
        Value::Signal(Arc::new(signal))
    }
}

impl<T> From<&Signal<T>> for Value
where
    T: Clone + Send + Sync + IntoSignalValue + 'static,
{
    fn from(signal: &Signal<T>) -> Self {
        Value::signal(signal)
    }
}

impl From<RawHtml> for Value {
    fn from(raw: RawHtml) -> Self {
        Value::RawHtml(raw)
    }
}

impl From<RawCss> for Value {
    fn from(css: RawCss) -> Self {
        Value::Css(css)
    }
}

impl From<EventListener> for Value {
    fn from(listener: EventListener) -> Self {
        Value::Listener(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_right_variant() {
        assert!(matches!(Value::from("a"), Value::Text(t) if t == "a"));
        assert!(matches!(Value::from(3_u8), Value::Text(t) if t == "3"));
        assert!(Value::from(None::<&str>).is_none());
        assert!(matches!(Value::from(Some(1.5_f64)), Value::Text(t) if t == "1.5"));
        assert!(matches!(Value::from(vec!["a", "b"]), Value::List(items) if items.len() == 2));
        assert!(matches!(Value::from(Signal::new(0_i32)), Value::Signal(_)));
        assert!(matches!(Value::from(RawHtml::new("<b>")), Value::RawHtml(_)));
    }

    #[test]
    fn display_objects_keep_their_text() {
        struct Point(i32, i32);
        impl fmt::Display for Point {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {})", self.0, self.1)
            }
        }
        let value = Value::display(Point(1, 2));
        assert_eq!(format!("{:?}", value), "Object(\"(1, 2)\")");
    }
}
