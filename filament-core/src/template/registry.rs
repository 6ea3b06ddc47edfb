//! Placeholder registry.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::key::PlaceholderKey;
use crate::dom::{ElementRef, EventListener, NodeRef};
use crate::raw::RawCss;
use crate::reactive::DynSignal;

/// Node list placed at an `elm-id` marker.
pub type NodeList = SmallVec<[NodeRef; 4]>;

/// What a placeholder resolves to.
#[derive(Clone)]
pub enum Payload {
    /// Nodes inserted, in order, where the marker stands.
    Nodes(NodeList),
    /// A signal-bound node that replaces its marker.
    Bound(NodeRef),
    /// Slot receiving the element carrying the `ref` attribute.
    Ref(ElementRef),
    /// Stylesheet attached to the element carrying the `css` attribute.
    Css(RawCss),
    /// Signal kept in sync with an attribute.
    SignalAttr(Arc<dyn DynSignal>),
    /// Listener attached to an element.
    Listener(EventListener),
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Nodes(nodes) => f.debug_tuple("Nodes").field(nodes).finish(),
            Payload::Bound(node) => f.debug_tuple("Bound").field(node).finish(),
            Payload::Ref(r) => f.debug_tuple("Ref").field(r).finish(),
            Payload::Css(css) => f.debug_tuple("Css").field(css).finish(),
            Payload::SignalAttr(s) => f.debug_tuple("SignalAttr").field(&s.id()).finish(),
            Payload::Listener(l) => f.debug_tuple("Listener").field(l).finish(),
        }
    }
}

/// Append-only map of pending substitutions for one render call.
///
/// Entries keep insertion order, which is interpolation order.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<PlaceholderKey, Payload>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. An existing key is never overwritten; returns
    /// whether the entry was added.
    pub fn insert(&mut self, key: PlaceholderKey, payload: Payload) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, payload);
        true
    }

    pub fn get(&self, key: &PlaceholderKey) -> Option<&Payload> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PlaceholderKey> {
        self.entries.keys()
    }
}

impl IntoIterator for Registry {
    type Item = (PlaceholderKey, Payload);
    type IntoIter = indexmap::map::IntoIter<PlaceholderKey, Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(PlaceholderKey, Payload)> for Registry {
    fn from_iter<I: IntoIterator<Item = (PlaceholderKey, Payload)>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for (key, payload) in iter {
            registry.insert(key, payload);
        }
        registry
    }
}
