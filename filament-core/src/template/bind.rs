//! Signal bindings.
//!
//! Every binding holds exactly one subscription on its signal. Before
//! mutating anything, the subscriber checks that its node is still
//! connected to a document; if it is not, it unsubscribes instead. A
//! fragment that is dropped without ever being attached therefore keeps
//! its subscriptions until the signal's next change.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::dom::NodeRef;
use crate::pipeline::is_blocked_url;
use crate::reactive::{DynSignal, Observe, SignalValue, SubscriberId};

/// The node a signal value is placed as, if it has one.
///
/// Text becomes a fresh text node and a node is used as is. A fragment
/// has no single node to track and yields `None`.
pub fn content_node(value: SignalValue) -> Option<NodeRef> {
    match value {
        SignalValue::Text(text) => Some(NodeRef::text(text)),
        SignalValue::Node(node) => Some(node),
        SignalValue::Fragment(_) => None,
    }
}

/// Keep `node` in sync with `signal`.
///
/// `node` is the node placed for the signal's current value. On a text
/// change while a text node is live, the node's data is updated in place;
/// otherwise the live node is replaced and the replacement becomes live.
/// A change that arrives while `node` is outside a document, including
/// before its fragment is first attached, ends the binding for good.
pub fn bind_content(signal: &dyn DynSignal, node: NodeRef) -> SubscriberId {
    let id = SubscriberId::new();
    let signal_id = signal.id();
    let live = Arc::new(Mutex::new(node));

    signal.observe_value(
        id,
        Box::new(move |value| {
            let mut live = live.lock();
            if !live.is_connected() {
                tracing::trace!(signal = signal_id, "content node disconnected, unsubscribing");
                return Observe::Unsubscribe;
            }

            if let SignalValue::Text(text) = &value {
                if live.set_data(text) {
                    return Observe::Keep;
                }
            }

            let Some(next) = content_node(value) else {
                tracing::warn!(signal = signal_id, "signal produced a fragment, binding left unchanged");
                return Observe::Keep;
            };
            match live.replace_with(&next) {
                Ok(()) => *live = next,
                Err(err) => tracing::debug!(signal = signal_id, %err, "content replacement failed"),
            }
            Observe::Keep
        }),
    );
    id
}

/// Keep attribute `name` of `host` in sync with `signal`, starting with
/// its current value.
///
/// URL attributes never receive a script-capable value; the attribute is
/// removed instead. As with [`bind_content`], a change seen while `host`
/// is outside a document ends the binding for good.
pub fn bind_attribute(signal: &dyn DynSignal, host: &NodeRef, name: &str) -> SubscriberId {
    write_attribute(host, name, &signal.current().to_text());

    let id = SubscriberId::new();
    let signal_id = signal.id();
    let host = host.clone();
    let name = name.to_string();

    signal.observe_value(
        id,
        Box::new(move |value| {
            if !host.is_connected() {
                tracing::trace!(signal = signal_id, attr = %name, "attribute host disconnected, unsubscribing");
                return Observe::Unsubscribe;
            }
            write_attribute(&host, &name, &value.to_text());
            Observe::Keep
        }),
    );
    id
}

fn write_attribute(host: &NodeRef, name: &str, value: &str) {
    if is_blocked_url(name, value) {
        tracing::debug!(attr = name, "blocked URL scheme in bound attribute");
        host.remove_attribute(name);
    } else {
        host.set_attribute(name, value);
    }
}
