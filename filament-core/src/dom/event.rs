//! Events and listeners.

use std::fmt;
use std::sync::Arc;

use super::NodeRef;

/// An event delivered to element listeners.
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    target: Option<NodeRef>,
    detail: Option<String>,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            detail: None,
        }
    }

    /// Attach the element the event is dispatched on.
    pub fn with_target(mut self, target: NodeRef) -> Self {
        self.target = Some(target);
        self
    }

    /// Attach a custom payload, as a `CustomEvent` would.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> Option<&NodeRef> {
        self.target.as_ref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// A shareable event callback.
#[derive(Clone)]
pub struct EventListener(Arc<dyn Fn(&Event) + Send + Sync>);

impl EventListener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventListener")
    }
}
