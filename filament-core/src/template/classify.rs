//! Value classification.
//!
//! Turns one interpolated [`Value`] into the text the assembler emits for
//! it, registering a payload when the value needs to be placed after
//! materialization.

use smallvec::smallvec;

use super::bind::{bind_content, content_node};
use super::key::{PlaceholderKey, PlaceholderKind};
use super::registry::{NodeList, Payload, Registry};
use super::value::Value;
use crate::dom::NodeRef;
use crate::pipeline::Materializer;
use crate::reactive::{DynSignal, SignalValue};

/// Where in the markup a value is being interpolated.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Interpolation index, unique within the render.
    pub index: usize,
    /// Attribute name if the value sits right after `name=`.
    pub assignment: Option<&'a str>,
}

/// Classify `value` and return the text to emit in its place.
pub fn classify(
    value: Value,
    cx: Context<'_>,
    registry: &mut Registry,
    materializer: &dyn Materializer,
) -> String {
    match value {
        Value::RawHtml(raw) => raw.into_string(),
        Value::List(items) => {
            let mut nodes = NodeList::new();
            for item in items {
                collect_nodes(item, &mut nodes, materializer);
            }
            place_nodes(registry, cx.index, nodes)
        }
        Value::Fragment(fragment) => place_nodes(registry, cx.index, smallvec![fragment.into_node()]),
        Value::Css(css) => attribute_payload(registry, cx, "css", PlaceholderKind::Css, Payload::Css(css)),
        Value::Ref(r) => attribute_payload(registry, cx, "ref", PlaceholderKind::Ref, Payload::Ref(r)),
        Value::Node(node) => place_nodes(registry, cx.index, smallvec![node]),
        Value::Signal(signal) => match cx.assignment {
            Some(attr) => {
                let key = PlaceholderKey::new(PlaceholderKind::SignalAttr(attr.to_string()), cx.index);
                let quoted = key.quoted();
                registry.insert(key, Payload::SignalAttr(signal));
                quoted
            }
            None => signal_content(signal.as_ref(), cx.index, registry),
        },
        Value::Listener(listener) => match cx.assignment {
            Some(attr) if attr.len() > 2 && attr.starts_with("on") => {
                let key = PlaceholderKey::new(PlaceholderKind::Event(attr.to_string()), cx.index);
                let quoted = key.quoted();
                registry.insert(key, Payload::Listener(listener));
                quoted
            }
            _ => {
                tracing::trace!(index = cx.index, "listener outside an event attribute dropped");
                String::new()
            }
        },
        Value::Object(object) => object.to_string(),
        Value::Text(text) => text,
        Value::None => String::new(),
    }
}

/// Register a payload that is only valid right after `expected=`.
fn attribute_payload(
    registry: &mut Registry,
    cx: Context<'_>,
    expected: &str,
    kind: PlaceholderKind,
    payload: Payload,
) -> String {
    if cx.assignment != Some(expected) {
        tracing::trace!(index = cx.index, expected, "value outside its attribute dropped");
        return String::new();
    }
    let key = PlaceholderKey::new(kind, cx.index);
    let quoted = key.quoted();
    registry.insert(key, payload);
    quoted
}

fn place_nodes(registry: &mut Registry, index: usize, nodes: NodeList) -> String {
    let key = PlaceholderKey::element(index);
    let marker = key.marker();
    registry.insert(key, Payload::Nodes(nodes));
    marker
}

fn signal_content(signal: &dyn DynSignal, index: usize, registry: &mut Registry) -> String {
    match signal.current() {
        SignalValue::Fragment(fragment) => {
            tracing::warn!(
                signal = signal.id(),
                "signal value is a document fragment and cannot be updated in place"
            );
            place_nodes(registry, index, smallvec![fragment.into_node()])
        }
        value => {
            let Some(node) = content_node(value) else {
                return String::new();
            };
            bind_content(signal, node.clone());
            let key = PlaceholderKey::content(index);
            let marker = key.marker();
            registry.insert(key, Payload::Bound(node));
            marker
        }
    }
}

/// Flatten one list entry into `out`.
fn collect_nodes(value: Value, out: &mut NodeList, materializer: &dyn Materializer) {
    match value {
        Value::RawHtml(raw) => out.extend(materializer.to_fragment(raw.as_str()).child_nodes()),
        Value::List(items) => {
            for item in items {
                collect_nodes(item, out, materializer);
            }
        }
        Value::Fragment(fragment) => out.extend(fragment.child_nodes()),
        Value::Node(node) => out.push(node),
        Value::Signal(signal) => match signal.current() {
            SignalValue::Fragment(fragment) => {
                tracing::warn!(signal = signal.id(), "fragment-valued signal in a list is placed once");
                out.extend(fragment.child_nodes());
            }
            value => {
                if let Some(node) = content_node(value) {
                    bind_content(signal.as_ref(), node.clone());
                    out.push(node);
                }
            }
        },
        Value::Object(object) => out.push(NodeRef::text(object.to_string())),
        Value::Text(text) => out.push(NodeRef::text(text)),
        Value::None => out.push(NodeRef::text("")),
        Value::Css(_) | Value::Ref(_) | Value::Listener(_) => {
            tracing::trace!("attribute-only value inside a list dropped");
        }
    }
}
